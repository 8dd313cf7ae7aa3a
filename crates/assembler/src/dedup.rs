use std::collections::HashSet;

use crate::model::{BatchReport, RecordBatch, RowError, SourceRecord, TrainingRecord};

/// Deterministic id for a record whose source carried none. Unique within a
/// pass as long as batch names are unique and each batch is internally stable.
pub fn synthesize_id(batch: &str, index: usize) -> String {
    format!("{batch}:{index}")
}

pub struct DedupOutput {
    pub records: Vec<TrainingRecord>,
    pub reports: Vec<BatchReport>,
}

/// Assemble the selected batches into one deduplicated record set.
///
/// Iterates records in batch order; the first occurrence of an
/// `appointment_id` is kept and later duplicates are dropped regardless of
/// field content. Records sharing all fields but distinct ids are both kept
/// (distinct real-world events, not duplicate ingestion).
pub fn dedup_batches(batches: &[&RecordBatch]) -> DedupOutput {
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();
    let mut reports = Vec::with_capacity(batches.len());

    for batch in batches {
        let mut report = BatchReport {
            batch: batch.name.clone(),
            kind: batch.kind,
            rows_in: batch.records.len() + batch.skipped.len(),
            rows_kept: 0,
            duplicates_removed: 0,
            ids_synthesized: 0,
            skipped: batch.skipped.clone(),
        };

        for (index, record) in batch.records.iter().enumerate() {
            if let Some(reason) = validate_record(record) {
                report.skipped.push(RowError { row: index, reason });
                continue;
            }

            let appointment_id = match &record.appointment_id {
                Some(id) => id.clone(),
                None => {
                    report.ids_synthesized += 1;
                    synthesize_id(&batch.name, index)
                }
            };

            if !seen.insert(appointment_id.clone()) {
                report.duplicates_removed += 1;
                continue;
            }

            report.rows_kept += 1;
            records.push(TrainingRecord {
                appointment_id,
                service_type: record.service_type.clone(),
                patient_type: record.patient_type.clone(),
                day_of_week: record.day_of_week.clone(),
                appointment_time: record.appointment_time.clone(),
                avg_duration: record.avg_duration,
                custom_service: record.custom_service,
                source: batch.name.clone(),
            });
        }

        reports.push(report);
    }

    DedupOutput { records, reports }
}

/// Records violating the data model are skipped, not fatal. Returns the
/// reason when a record is malformed.
fn validate_record(record: &SourceRecord) -> Option<String> {
    if record.service_type.trim().is_empty() {
        return Some("missing service_type".into());
    }
    if record.day_of_week.trim().is_empty() {
        return Some("missing day_of_week".into());
    }
    if !record.avg_duration.is_finite() || record.avg_duration <= 0.0 {
        return Some(format!("invalid avg_duration {}", record.avg_duration));
    }
    None
}
