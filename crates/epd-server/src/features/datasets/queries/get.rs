//! Get dataset query

use sqlx::SqlitePool;
use uuid::Uuid;

use super::super::types::DatasetDetail;
use crate::store::{self, StoreError};

/// Query for one dataset with its items
#[derive(Debug, Clone)]
pub struct GetDatasetQuery {
    pub id: Uuid,
}

/// Errors that can occur when fetching a dataset
#[derive(Debug, thiserror::Error)]
pub enum GetDatasetError {
    #[error("Dataset not found: {0}")]
    NotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for GetDatasetError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => GetDatasetError::NotFound(id),
            other => GetDatasetError::Storage(other),
        }
    }
}

/// Handler function for the dataset detail query
#[tracing::instrument(skip(pool), fields(dataset_id = %query.id))]
pub async fn handle(
    pool: SqlitePool,
    query: GetDatasetQuery,
) -> Result<DatasetDetail, GetDatasetError> {
    let dataset = store::get_dataset(&pool, query.id).await?;
    let items = store::items_for_dataset(&pool, query.id).await?;

    tracing::debug!(items = items.len(), "Dataset retrieved");

    Ok(DatasetDetail {
        id: dataset.id,
        filename: dataset.filename,
        checksum: dataset.checksum,
        created_at: dataset.created_at,
        summary: dataset.summary,
        items,
    })
}
