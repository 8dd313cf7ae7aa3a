use crate::model::{AssemblySummary, BatchReport, SourceKind};

/// Fold per-batch reports into the pass summary.
pub fn compute_summary(
    mode: SourceKind,
    batches_skipped: usize,
    reports: &[BatchReport],
    total_records: usize,
) -> AssemblySummary {
    let mut duplicates_removed = 0;
    let mut ids_synthesized = 0;
    let mut malformed_rows = 0;

    for report in reports {
        duplicates_removed += report.duplicates_removed;
        ids_synthesized += report.ids_synthesized;
        malformed_rows += report.skipped.len();
    }

    AssemblySummary {
        mode,
        total_records,
        duplicates_removed,
        ids_synthesized,
        malformed_rows,
        batches_used: reports.len(),
        batches_skipped,
    }
}
