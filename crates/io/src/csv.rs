// Bootstrap CSV loading

use std::io::Read;
use std::path::Path;

use trainset_assembler::config::ColumnMapping;
use trainset_assembler::error::AssembleError;
use trainset_assembler::model::{RecordBatch, RowError, SourceKind, SourceRecord};

/// Load a CSV file into a batch.
pub fn load_csv_file(
    name: &str,
    kind: SourceKind,
    path: &Path,
    columns: &ColumnMapping,
) -> Result<RecordBatch, AssembleError> {
    let content = read_file_as_utf8(path)?;
    load_csv_batch(name, kind, &content, columns)
}

/// Parse CSV data into a batch, applying the column mapping.
///
/// Required columns: `service_type`, `day_of_week`, `avg_duration` (a
/// missing header is fatal for the batch). The `appointment_id`,
/// `patient_type`, and `appointment_time` columns are optional; blank or
/// absent values fall back to no id / "Adult" / "Afternoon". Row indexes in
/// the skipped list are zero-based data rows (header excluded).
pub fn load_csv_batch(
    name: &str,
    kind: SourceKind,
    csv_data: &str,
    columns: &ColumnMapping,
) -> Result<RecordBatch, AssembleError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AssembleError::BatchParse {
            source: name.into(),
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let required = |column: &str| -> Result<usize, AssembleError> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| AssembleError::MissingColumn {
                source: name.into(),
                column: column.into(),
            })
    };
    let optional = |column: &str| headers.iter().position(|h| h == column);

    let service_idx = required(&columns.service_type)?;
    let day_idx = required(&columns.day_of_week)?;
    let duration_idx = required(&columns.avg_duration)?;
    let id_idx = optional(&columns.appointment_id);
    let patient_idx = optional(&columns.patient_type);
    let time_idx = optional(&columns.appointment_time);

    let mut batch = RecordBatch::new(name, kind);

    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                batch.skipped.push(RowError {
                    row,
                    reason: format!("unreadable row: {e}"),
                });
                continue;
            }
        };

        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let service_type = field(service_idx).to_lowercase();
        if service_type.is_empty() {
            batch.skipped.push(RowError {
                row,
                reason: format!("missing {}", columns.service_type),
            });
            continue;
        }

        let day_of_week = field(day_idx).to_string();
        if day_of_week.is_empty() {
            batch.skipped.push(RowError {
                row,
                reason: format!("missing {}", columns.day_of_week),
            });
            continue;
        }

        let duration_raw = field(duration_idx);
        let avg_duration = match duration_raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => {
                batch.skipped.push(RowError {
                    row,
                    reason: format!("invalid {} '{duration_raw}'", columns.avg_duration),
                });
                continue;
            }
        };

        let appointment_id = id_idx
            .map(field)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let patient_type = patient_idx
            .map(field)
            .filter(|v| !v.is_empty())
            .unwrap_or("Adult")
            .to_string();
        let appointment_time = time_idx
            .map(field)
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
            custom_service: false,
        });
    }

    Ok(batch)
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, AssembleError> {
    let mut file = std::fs::File::open(path).map_err(|e| AssembleError::Io(e.to_string()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| AssembleError::Io(e.to_string()))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
