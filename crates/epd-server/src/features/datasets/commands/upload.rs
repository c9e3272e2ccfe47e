//! Upload dataset command
//!
//! Receives the raw multipart payload and hands it to the ingestion
//! pipeline. All parsing, validation, persistence, summarization, and
//! eviction happen inside the pipeline; this command only carries the
//! transport-level payload checks.

use epd_common::types::IngestReceipt;
use sqlx::SqlitePool;

use crate::ingest::{self, IngestError};

/// Command to ingest one uploaded CSV file
#[derive(Debug, Clone)]
pub struct UploadDatasetCommand {
    /// Filename as declared by the client
    pub filename: String,
    /// Raw file bytes
    pub content: Vec<u8>,
}

/// Errors that can occur when uploading a dataset
#[derive(Debug, thiserror::Error)]
pub enum UploadDatasetError {
    #[error("No file provided. Please upload a CSV file.")]
    MissingFile,

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl UploadDatasetCommand {
    /// Validates the transport-level payload
    pub fn validate(&self) -> Result<(), UploadDatasetError> {
        if self.filename.trim().is_empty() {
            return Err(UploadDatasetError::MissingFile);
        }
        Ok(())
    }
}

/// Handler function for dataset uploads
#[tracing::instrument(skip(pool, command), fields(filename = %command.filename))]
pub async fn handle(
    pool: SqlitePool,
    command: UploadDatasetCommand,
) -> Result<IngestReceipt, UploadDatasetError> {
    command.validate()?;

    let receipt = ingest::pipeline::run(&pool, &command.filename, &command.content).await?;

    tracing::info!(
        dataset_id = %receipt.id,
        items = receipt.item_count,
        "Dataset ingested successfully"
    );

    Ok(receipt)
}
