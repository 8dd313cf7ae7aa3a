use serde::Deserialize;

use crate::error::AssembleError;
use crate::model::SourceKind;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AssemblyConfig {
    pub name: String,
    /// Forces one side of the bootstrap/live switch; `auto` picks live
    /// whenever any live batch is non-empty.
    #[serde(default)]
    pub mode: ModeOverride,
    /// Below this many assembled records the caller should skip training.
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
    /// Sources in assembly order. Order decides which record survives an
    /// id collision (first occurrence wins).
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_min_samples() -> usize {
    50
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeOverride {
    Auto,
    Bootstrap,
    Live,
}

impl Default for ModeOverride {
    fn default() -> Self {
        Self::Auto
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub kind: SourceKind,
    pub file: String,
    #[serde(default)]
    pub format: SourceFormat,
    #[serde(default)]
    pub columns: ColumnMapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Tabular file with a header row.
    Csv,
    /// Store export: JSON array of entries.
    Json,
}

impl Default for SourceFormat {
    fn default() -> Self {
        Self::Csv
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Header names for CSV sources. Defaults match the bundled synthetic files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub appointment_id: String,
    pub service_type: String,
    pub patient_type: String,
    pub day_of_week: String,
    pub appointment_time: String,
    pub avg_duration: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            appointment_id: "appointment_id".into(),
            service_type: "service_type".into(),
            patient_type: "patient_type".into(),
            day_of_week: "day_of_week".into(),
            appointment_time: "appointment_time".into(),
            avg_duration: "avg_duration".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl AssemblyConfig {
    pub fn from_toml(input: &str) -> Result<Self, AssembleError> {
        let config: AssemblyConfig =
            toml::from_str(input).map_err(|e| AssembleError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AssembleError> {
        if self.sources.is_empty() {
            return Err(AssembleError::ConfigValidation(
                "at least 1 source is required".into(),
            ));
        }

        for (i, source) in self.sources.iter().enumerate() {
            if source.name.trim().is_empty() {
                return Err(AssembleError::ConfigValidation(format!(
                    "source #{i}: name must not be empty"
                )));
            }
            if self.sources[..i].iter().any(|s| s.name == source.name) {
                return Err(AssembleError::DuplicateBatch(source.name.clone()));
            }
        }

        // A forced mode must have at least one source to draw from
        let forced = match self.mode {
            ModeOverride::Auto => None,
            ModeOverride::Bootstrap => Some(SourceKind::Bootstrap),
            ModeOverride::Live => Some(SourceKind::Live),
        };
        if let Some(kind) = forced {
            if !self.sources.iter().any(|s| s.kind == kind) {
                return Err(AssembleError::ConfigValidation(format!(
                    "mode = \"{kind}\" but no {kind} source is configured"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
