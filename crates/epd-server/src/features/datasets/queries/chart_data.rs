//! Chart data query
//!
//! Per-equipment-type mean measures for one dataset, computed on demand by
//! the aggregator from the persisted items.

use epd_common::types::{ChartData, EquipmentRecord};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::ingest::aggregator;
use crate::store::{self, StoreError};

/// Query for the chart view of one dataset
#[derive(Debug, Clone)]
pub struct ChartDataQuery {
    pub id: Uuid,
}

/// Errors that can occur when computing chart data
#[derive(Debug, thiserror::Error)]
pub enum ChartDataError {
    #[error("Dataset not found: {0}")]
    NotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for ChartDataError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ChartDataError::NotFound(id),
            other => ChartDataError::Storage(other),
        }
    }
}

/// Handler function for the chart data query
#[tracing::instrument(skip(pool), fields(dataset_id = %query.id))]
pub async fn handle(pool: SqlitePool, query: ChartDataQuery) -> Result<ChartData, ChartDataError> {
    // Existence check first so an unknown id is NotFound, not an empty chart.
    store::get_dataset(&pool, query.id).await?;

    let items = store::items_for_dataset(&pool, query.id).await?;
    let records: Vec<EquipmentRecord> = items.iter().map(|item| item.record()).collect();
    let chart = aggregator::chart_view(&records);

    tracing::debug!(types = chart.labels.len(), "Chart data computed");

    Ok(chart)
}
