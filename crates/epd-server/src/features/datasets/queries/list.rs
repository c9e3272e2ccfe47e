//! List datasets query

use epd_common::types::Dataset;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::store::{self, StoreError};

/// Default number of datasets returned; matches the retention window.
pub const DEFAULT_LIMIT: i64 = 5;

/// Upper bound a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// Query parameters for listing datasets
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDatasetsQuery {
    pub limit: Option<i64>,
}

impl ListDatasetsQuery {
    /// Effective limit: default 5, clamped to 1..=100
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// Errors that can occur when listing datasets
#[derive(Debug, thiserror::Error)]
pub enum ListDatasetsError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Handler function for the dataset listing query
#[tracing::instrument(skip(pool), fields(limit = query.effective_limit()))]
pub async fn handle(
    pool: SqlitePool,
    query: ListDatasetsQuery,
) -> Result<Vec<Dataset>, ListDatasetsError> {
    let datasets = store::list_recent(&pool, query.effective_limit()).await?;

    tracing::debug!(count = datasets.len(), "Datasets listed");

    Ok(datasets)
}
