//! Shared response types for the datasets feature

use chrono::{DateTime, Utc};
use epd_common::types::{DatasetSummary, EquipmentItem};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One dataset with its items, as returned by the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDetail {
    pub id: Uuid,
    pub filename: String,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
    pub summary: Option<DatasetSummary>,
    pub items: Vec<EquipmentItem>,
}
