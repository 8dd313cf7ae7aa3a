// Live-store export parsing

use std::path::Path;

use serde::Deserialize;

use trainset_assembler::error::AssembleError;
use trainset_assembler::model::{RecordBatch, RowError, SourceKind, SourceRecord};

/// One entry from the append-only store's export: a JSON array of
/// appointment-duration documents. Field names follow the store's
/// camelCase; snake_case aliases are accepted for hand-built files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEntry {
    #[serde(default, alias = "appointment_id")]
    pub appointment_id: Option<String>,
    #[serde(
        default,
        alias = "procedure_type",
        alias = "serviceType",
        alias = "service_type"
    )]
    pub procedure_type: Option<String>,
    #[serde(default, alias = "patient_type")]
    pub patient_type: Option<String>,
    #[serde(default, alias = "day_of_week")]
    pub day_of_week: Option<String>,
    #[serde(
        default,
        alias = "time_period",
        alias = "appointmentTime",
        alias = "appointment_time"
    )]
    pub time_period: Option<String>,
    #[serde(
        default,
        alias = "actual_duration_minutes",
        alias = "avgDuration",
        alias = "avg_duration"
    )]
    pub actual_duration_minutes: Option<f64>,
    #[serde(default, alias = "is_custom_procedure")]
    pub is_custom_procedure: bool,
    /// Set by the store once a prior pass has consumed the entry. Updating
    /// it is the exporter's job, never this crate's.
    #[serde(default, alias = "used_for_training")]
    pub used_for_training: bool,
}

/// Keep-predicate for entries not yet consumed by a prior training pass.
pub fn unused(entry: &ExportEntry) -> bool {
    !entry.used_for_training
}

/// Load a store export file into a live batch.
pub fn load_export_file(
    name: &str,
    path: &Path,
    keep: impl Fn(&ExportEntry) -> bool,
) -> Result<RecordBatch, AssembleError> {
    let data = std::fs::read_to_string(path).map_err(|e| AssembleError::Io(e.to_string()))?;
    load_export_batch(name, &data, keep)
}

/// Parse a store export (JSON array) into a live batch, keeping only
/// entries the predicate accepts. Entries that fail to deserialize or
/// validate are skipped and recorded by index; an unparseable document is
/// fatal for the batch.
pub fn load_export_batch(
    name: &str,
    json_data: &str,
    keep: impl Fn(&ExportEntry) -> bool,
) -> Result<RecordBatch, AssembleError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json_data).map_err(|e| AssembleError::BatchParse {
            source: name.into(),
            message: e.to_string(),
        })?;

    let mut batch = RecordBatch::new(name, SourceKind::Live);

    for (row, value) in values.into_iter().enumerate() {
        let entry: ExportEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                batch.skipped.push(RowError {
                    row,
                    reason: format!("bad entry: {e}"),
                });
                continue;
            }
        };

        if !keep(&entry) {
            continue;
        }

        let service_type = entry
            .procedure_type
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_lowercase();
        if service_type.is_empty() {
            batch.skipped.push(RowError {
                row,
                reason: "missing procedureType".into(),
            });
            continue;
        }

        let day_of_week = entry
            .day_of_week
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string();
        if day_of_week.is_empty() {
            batch.skipped.push(RowError {
                row,
                reason: "missing dayOfWeek".into(),
            });
            continue;
        }

        let avg_duration = match entry.actual_duration_minutes {
            Some(v) if v.is_finite() && v > 0.0 => v,
            other => {
                batch.skipped.push(RowError {
                    row,
                    reason: format!("invalid actualDurationMinutes {other:?}"),
                });
                continue;
            }
        };

        let appointment_id = entry
            .appointment_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let patient_type = entry
            .patient_type
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("Adult")
            .to_string();
        let appointment_time = entry
            .time_period
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("Afternoon")
            .to_string();

        batch.records.push(SourceRecord {
            appointment_id,
            service_type,
            patient_type,
            day_of_week,
            appointment_time,
            avg_duration,
            custom_service: entry.is_custom_procedure,
        });
    }

    Ok(batch)
}
