use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which side of the bootstrap/live switch a batch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Bundled synthetic data, used only until real data exists.
    Bootstrap,
    /// Records exported from the external append-only store.
    Live,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bootstrap => write!(f, "bootstrap"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// A parsed row before assembly. `appointment_id` is `None` when the source
/// carried no id; the engine synthesizes one from the batch name and position.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub appointment_id: Option<String>,
    pub service_type: String,
    pub patient_type: String,
    pub day_of_week: String,
    pub appointment_time: String,
    pub avg_duration: f64,
    pub custom_service: bool,
}

/// A named, ordered batch of parsed records plus the rows its loader skipped.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    pub name: String,
    pub kind: SourceKind,
    pub records: Vec<SourceRecord>,
    pub skipped: Vec<RowError>,
}

impl RecordBatch {
    pub fn new(name: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Pre-loaded batches in assembly order. Order is load-bearing: on an id
/// collision the earlier batch's record wins.
pub struct AssemblyInput {
    pub batches: Vec<RecordBatch>,
}

// ---------------------------------------------------------------------------
// Errors carried as data (recoverable, per spec: never fatal to a pass)
// ---------------------------------------------------------------------------

/// One row that could not be turned into a training record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    /// Zero-based row index within the batch.
    pub row: usize,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One deduplicated appointment-duration sample, ready for model fitting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRecord {
    pub appointment_id: String,
    pub service_type: String,
    pub patient_type: String,
    pub day_of_week: String,
    pub appointment_time: String,
    pub avg_duration: f64,
    pub custom_service: bool,
    /// Name of the batch this record was taken from.
    pub source: String,
}

/// Per-batch accounting for one assembly pass.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch: String,
    pub kind: SourceKind,
    pub rows_in: usize,
    pub rows_kept: usize,
    pub duplicates_removed: usize,
    pub ids_synthesized: usize,
    pub skipped: Vec<RowError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssemblySummary {
    /// Which side of the switch fed this pass.
    pub mode: SourceKind,
    pub total_records: usize,
    pub duplicates_removed: usize,
    pub ids_synthesized: usize,
    pub malformed_rows: usize,
    pub batches_used: usize,
    pub batches_skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssemblyMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssemblyResult {
    pub meta: AssemblyMeta,
    pub summary: AssemblySummary,
    pub batches: Vec<BatchReport>,
    pub records: Vec<TrainingRecord>,
}
