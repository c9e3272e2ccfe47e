//! Error types for EPD

use thiserror::Error;

/// Result type alias for EPD operations
pub type Result<T> = std::result::Result<T, EpdError>;

/// Main error type for EPD
#[derive(Error, Debug)]
pub enum EpdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
