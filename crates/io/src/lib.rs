//! `trainset-io` — Batch loading for the training-set assembler.
//!
//! Bootstrap CSV files and live-store JSON exports. Loaders skip malformed
//! rows (recorded per batch with their row index) and only fail on
//! batch-level problems: unreadable file, missing header column,
//! unparseable document.

pub mod csv;
pub mod export;

pub use csv::{load_csv_batch, load_csv_file, read_file_as_utf8};
pub use export::{load_export_batch, load_export_file, unused, ExportEntry};
