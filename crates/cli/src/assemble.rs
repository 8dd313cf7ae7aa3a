//! `trainset run` / `trainset validate` — config-driven assembly.

use std::path::{Path, PathBuf};

use trainset_assembler::config::{AssemblyConfig, SourceFormat};
use trainset_assembler::model::{AssemblyInput, AssemblySummary, RecordBatch, SourceKind};
use trainset_io::{load_csv_file, load_export_file, unused};

use crate::exit_codes::{EXIT_BELOW_MIN, EXIT_INVALID_CONFIG, EXIT_RUNTIME};
use crate::CliError;

fn assemble_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError {
        code,
        message: msg.into(),
        hint: None,
    }
}

pub fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    include_used: bool,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| assemble_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;

    let config = AssemblyConfig::from_toml(&config_str)
        .map_err(|e| assemble_err(EXIT_INVALID_CONFIG, e.to_string()))?;

    // Resolve source paths relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let mut batches: Vec<RecordBatch> = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        let path = base_dir.join(&source.file);
        let batch = match source.format {
            SourceFormat::Csv => load_csv_file(&source.name, source.kind, &path, &source.columns),
            SourceFormat::Json if include_used => {
                load_export_file(&source.name, &path, |_| true)
            }
            SourceFormat::Json => load_export_file(&source.name, &path, unused),
        }
        .map_err(|e| assemble_err(EXIT_RUNTIME, format!("{}: {e}", path.display())))?;
        batches.push(batch);
    }

    let input = AssemblyInput { batches };
    let result = trainset_assembler::run(&config, &input)
        .map_err(|e| assemble_err(EXIT_RUNTIME, e.to_string()))?;

    // Output
    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| assemble_err(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;

    let out_path = output_file.or_else(|| config.output.json.as_ref().map(|p| base_dir.join(p)));
    if let Some(ref path) = out_path {
        std::fs::write(path, &json_str)
            .map_err(|e| assemble_err(EXIT_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    eprintln!("{}", summary_line(&result.summary));
    for report in &result.batches {
        for err in &report.skipped {
            eprintln!("  {}: row {}: {}", report.batch, err.row, err.reason);
        }
    }

    if result.summary.total_records < config.min_samples {
        return Err(CliError {
            code: EXIT_BELOW_MIN,
            message: format!(
                "{} record(s) assembled, below min_samples = {}",
                result.summary.total_records, config.min_samples
            ),
            hint: Some("skip the training step this cycle".into()),
        });
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| assemble_err(EXIT_RUNTIME, format!("cannot read config: {e}")))?;

    match AssemblyConfig::from_toml(&config_str) {
        Ok(config) => {
            let bootstrap = config
                .sources
                .iter()
                .filter(|s| s.kind == SourceKind::Bootstrap)
                .count();
            let live = config.sources.len() - bootstrap;
            eprintln!(
                "valid: assembly '{}' with {} source(s) ({bootstrap} bootstrap, {live} live), min_samples = {}",
                config.name,
                config.sources.len(),
                config.min_samples,
            );
            Ok(())
        }
        Err(e) => Err(assemble_err(EXIT_INVALID_CONFIG, e.to_string())),
    }
}

fn summary_line(summary: &AssemblySummary) -> String {
    format!(
        "{} assembly: {} record(s) from {} batch(es), {} skipped: {} duplicates removed, {} ids synthesized, {} malformed rows",
        summary.mode,
        summary.total_records,
        summary.batches_used,
        summary.batches_skipped,
        summary.duplicates_removed,
        summary.ids_synthesized,
        summary.malformed_rows,
    )
}
