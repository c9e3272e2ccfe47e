//! CSV ingestion core
//!
//! The pipeline turns an untrusted CSV upload into a persisted, summarized,
//! retention-bounded dataset:
//!
//! - [`parser`] — raw bytes into a typed table
//! - [`validator`] — required-column schema check and per-row typed fold
//! - [`aggregator`] — summary statistics and chart-ready per-type means
//! - [`pipeline`] — orchestration, one transaction from persist to evict

pub mod aggregator;
pub mod parser;
pub mod pipeline;
pub mod validator;

use thiserror::Error;

use crate::store::StoreError;

/// Ingestion failure taxonomy.
///
/// Everything except `Storage` is detected before any mutation; `Storage`
/// surfaces after a failed atomic commit. Either way no partial state is
/// left behind.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The declared filename is not a CSV file
    #[error("Invalid file type: '{0}'. Please upload a CSV file.")]
    Format(String),

    /// The bytes are not well-formed CSV (encoding, ragged rows, ...)
    #[error("Error parsing CSV file: {0}")]
    Parse(String),

    /// The file has no data rows
    #[error("The CSV file is empty.")]
    EmptyInput,

    /// One or more required columns are absent
    #[error("Missing required columns: {}", .missing.join(", "))]
    Schema {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// Row-level validation failures; carries the first
    /// [`validator::MAX_REPORTED_VIOLATIONS`] messages and the true total
    #[error("Data validation failed: {total} violation(s)")]
    Content {
        violations: Vec<String>,
        total: usize,
    },

    /// The store could not commit the dataset
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}
