use std::collections::HashSet;

use crate::config::{AssemblyConfig, ModeOverride};
use crate::dedup::{dedup_batches, DedupOutput};
use crate::error::AssembleError;
use crate::model::{AssemblyInput, AssemblyMeta, AssemblyResult, RecordBatch, SourceKind};
use crate::summary::compute_summary;

/// Decide which side of the switch feeds this pass: live wins whenever any
/// live batch is non-empty, otherwise bootstrap. Evaluated once per pass,
/// never per record.
pub fn select_mode(batches: &[RecordBatch]) -> SourceKind {
    let live_has_data = batches
        .iter()
        .any(|b| b.kind == SourceKind::Live && !b.records.is_empty());
    if live_has_data {
        SourceKind::Live
    } else {
        SourceKind::Bootstrap
    }
}

/// Run one assembly pass per config. Returns the deduplicated record set,
/// counters, and per-batch error lists. All-empty input is a valid outcome
/// (empty set, zero counters), not an error.
pub fn run(config: &AssemblyConfig, input: &AssemblyInput) -> Result<AssemblyResult, AssembleError> {
    // Duplicate names would collide synthesized ids across batches
    let mut names: HashSet<&str> = HashSet::new();
    for batch in &input.batches {
        if !names.insert(batch.name.as_str()) {
            return Err(AssembleError::DuplicateBatch(batch.name.clone()));
        }
    }

    let mode = match config.mode {
        ModeOverride::Auto => select_mode(&input.batches),
        ModeOverride::Bootstrap => SourceKind::Bootstrap,
        ModeOverride::Live => SourceKind::Live,
    };

    let selected: Vec<&RecordBatch> = input.batches.iter().filter(|b| b.kind == mode).collect();
    let batches_skipped = input.batches.len() - selected.len();

    let DedupOutput { records, reports } = dedup_batches(&selected);
    let summary = compute_summary(mode, batches_skipped, &reports, records.len());

    Ok(AssemblyResult {
        meta: AssemblyMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        batches: reports,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceRecord;

    fn config(toml: &str) -> AssemblyConfig {
        AssemblyConfig::from_toml(toml).unwrap()
    }

    fn minimal_config() -> AssemblyConfig {
        config(
            r#"
name = "Test"

[[sources]]
name = "s1"
kind = "bootstrap"
file = "s1.csv"
"#,
        )
    }

    fn record(id: Option<&str>) -> SourceRecord {
        SourceRecord {
            appointment_id: id.map(Into::into),
            service_type: "filling".into(),
            patient_type: "Adult".into(),
            day_of_week: "Tuesday".into(),
            appointment_time: "Afternoon".into(),
            avg_duration: 45.0,
            custom_service: false,
        }
    }

    fn batch(name: &str, kind: SourceKind, ids: &[&str]) -> RecordBatch {
        RecordBatch {
            name: name.into(),
            kind,
            records: ids.iter().map(|id| record(Some(id))).collect(),
            skipped: Vec::new(),
        }
    }

    #[test]
    fn live_data_excludes_all_bootstrap_batches() {
        let input = AssemblyInput {
            batches: vec![
                batch("synthetic", SourceKind::Bootstrap, &["s-0", "s-1"]),
                batch("export", SourceKind::Live, &["live-0"]),
            ],
        };
        let result = run(&minimal_config(), &input).unwrap();
        assert_eq!(result.summary.mode, SourceKind::Live);
        assert_eq!(result.summary.total_records, 1);
        assert_eq!(result.summary.batches_used, 1);
        assert_eq!(result.summary.batches_skipped, 1);
        assert!(result.records.iter().all(|r| r.source == "export"));
    }

    #[test]
    fn empty_live_batches_fall_back_to_bootstrap() {
        let input = AssemblyInput {
            batches: vec![
                batch("synthetic", SourceKind::Bootstrap, &["s-0", "s-1"]),
                batch("export", SourceKind::Live, &[]),
            ],
        };
        let result = run(&minimal_config(), &input).unwrap();
        assert_eq!(result.summary.mode, SourceKind::Bootstrap);
        assert_eq!(result.summary.total_records, 2);
    }

    #[test]
    fn all_batches_empty_is_a_valid_outcome() {
        let input = AssemblyInput {
            batches: vec![
                batch("synthetic", SourceKind::Bootstrap, &[]),
                batch("export", SourceKind::Live, &[]),
            ],
        };
        let result = run(&minimal_config(), &input).unwrap();
        assert_eq!(result.summary.total_records, 0);
        assert_eq!(result.summary.duplicates_removed, 0);
        assert_eq!(result.summary.ids_synthesized, 0);
        assert!(result.records.is_empty());
    }

    #[test]
    fn no_input_batches_at_all() {
        let input = AssemblyInput { batches: vec![] };
        let result = run(&minimal_config(), &input).unwrap();
        assert_eq!(result.summary.mode, SourceKind::Bootstrap);
        assert_eq!(result.summary.total_records, 0);
    }

    #[test]
    fn mode_override_bootstrap_ignores_live_data() {
        let cfg = config(
            r#"
name = "Forced"
mode = "bootstrap"

[[sources]]
name = "s1"
kind = "bootstrap"
file = "s1.csv"
"#,
        );
        let input = AssemblyInput {
            batches: vec![
                batch("synthetic", SourceKind::Bootstrap, &["s-0"]),
                batch("export", SourceKind::Live, &["live-0"]),
            ],
        };
        let result = run(&cfg, &input).unwrap();
        assert_eq!(result.summary.mode, SourceKind::Bootstrap);
        assert_eq!(result.records[0].appointment_id, "s-0");
    }

    #[test]
    fn intra_batch_duplicates_dropped_first_kept() {
        // 60 rows; "live-7" appears 5 times, everything else is unique
        let mut ids: Vec<String> = (0..56)
            .filter(|&i| i != 7)
            .map(|i| format!("live-{i}"))
            .collect();
        for _ in 0..5 {
            ids.push("live-7".to_string());
        }
        assert_eq!(ids.len(), 60);
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let input = AssemblyInput {
            batches: vec![
                batch("synthetic", SourceKind::Bootstrap, &["s-0"]),
                batch("export", SourceKind::Live, &id_refs),
            ],
        };
        let result = run(&minimal_config(), &input).unwrap();
        assert_eq!(result.summary.total_records, 56);
        assert_eq!(result.summary.duplicates_removed, 4);
        assert!(result.records.iter().all(|r| r.source == "export"));
    }

    #[test]
    fn synthesized_ids_counted() {
        let input = AssemblyInput {
            batches: vec![RecordBatch {
                name: "live-batch".into(),
                kind: SourceKind::Live,
                records: vec![record(None), record(None)],
                skipped: Vec::new(),
            }],
        };
        let result = run(&minimal_config(), &input).unwrap();
        assert_eq!(result.summary.total_records, 2);
        assert_eq!(result.summary.ids_synthesized, 2);
        let ids: Vec<&str> = result
            .records
            .iter()
            .map(|r| r.appointment_id.as_str())
            .collect();
        assert_eq!(ids, ["live-batch:0", "live-batch:1"]);
    }

    #[test]
    fn idempotence() {
        let input = AssemblyInput {
            batches: vec![
                batch("a", SourceKind::Live, &["x", "y", "x"]),
                batch("b", SourceKind::Live, &["y", "z"]),
            ],
        };
        let r1 = run(&minimal_config(), &input).unwrap();
        let r2 = run(&minimal_config(), &input).unwrap();
        assert_eq!(r1.records, r2.records);
        assert_eq!(r1.summary.duplicates_removed, r2.summary.duplicates_removed);
        assert_eq!(r1.summary.ids_synthesized, r2.summary.ids_synthesized);
    }

    #[test]
    fn reject_duplicate_batch_names() {
        let input = AssemblyInput {
            batches: vec![
                batch("a", SourceKind::Live, &["x"]),
                batch("a", SourceKind::Live, &["y"]),
            ],
        };
        let err = run(&minimal_config(), &input).unwrap_err();
        assert!(err.to_string().contains("duplicate batch name"));
    }

    #[test]
    fn select_mode_is_a_single_switch() {
        let batches = vec![
            batch("synthetic", SourceKind::Bootstrap, &["s-0"]),
            batch("export-1", SourceKind::Live, &[]),
            batch("export-2", SourceKind::Live, &["live-0"]),
        ];
        assert_eq!(select_mode(&batches), SourceKind::Live);
        assert_eq!(select_mode(&batches[..2]), SourceKind::Bootstrap);
    }
}
