//! Delete dataset command

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::store::{self, StoreError};

/// Command to delete one dataset and all its items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDatasetCommand {
    pub id: Uuid,
}

/// Response from deleting a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDatasetResponse {
    pub id: Uuid,
    pub items_deleted: u64,
}

/// Errors that can occur when deleting a dataset
#[derive(Debug, thiserror::Error)]
pub enum DeleteDatasetError {
    #[error("Dataset not found: {0}")]
    NotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for DeleteDatasetError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => DeleteDatasetError::NotFound(id),
            other => DeleteDatasetError::Storage(other),
        }
    }
}

/// Handler function for dataset deletion
#[tracing::instrument(skip(pool), fields(dataset_id = %command.id))]
pub async fn handle(
    pool: SqlitePool,
    command: DeleteDatasetCommand,
) -> Result<DeleteDatasetResponse, DeleteDatasetError> {
    let items_deleted = store::delete_dataset(&pool, command.id).await?;

    tracing::info!(
        dataset_id = %command.id,
        items_deleted,
        "Dataset deleted"
    );

    Ok(DeleteDatasetResponse {
        id: command.id,
        items_deleted,
    })
}
