use std::fmt;

#[derive(Debug)]
pub enum AssembleError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (no sources, duplicate names, bad mode).
    ConfigValidation(String),
    /// Two batches share a name; synthesized ids embed the batch name, so
    /// duplicate names could collide ids across batches.
    DuplicateBatch(String),
    /// Missing required column in a source's header.
    MissingColumn { source: String, column: String },
    /// A batch document could not be parsed at all (not row-recoverable).
    BatchParse { source: String, message: String },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::DuplicateBatch(name) => write!(f, "duplicate batch name: '{name}'"),
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::BatchParse { source, message } => {
                write!(f, "source '{source}': cannot parse batch: {message}")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AssembleError {}
