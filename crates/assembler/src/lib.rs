//! `trainset-assembler` — Training-set assembly engine.
//!
//! Pure engine crate: receives pre-loaded record batches, returns one
//! deduplicated record set plus counters and per-batch error lists.
//! No CLI or IO dependencies.

pub mod config;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod model;
pub mod summary;

pub use config::AssemblyConfig;
pub use engine::{run, select_mode};
pub use error::AssembleError;
pub use model::{AssemblyInput, AssemblyResult, RecordBatch, SourceKind, TrainingRecord};
