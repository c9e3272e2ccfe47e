//! Wire types for EPD server responses
//!
//! Payload types live in `epd_common::types`; this module only adds the
//! response envelope and the shapes specific to individual endpoints.

use chrono::{DateTime, Utc};
use epd_common::types::{DatasetSummary, EquipmentItem};
use serde::Deserialize;
use uuid::Uuid;

/// The `{success, data, error, meta}` envelope every endpoint uses
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

/// Error payload carried on a failed request
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// One dataset with its items, as returned by the detail endpoint
#[derive(Debug, Deserialize)]
pub struct DatasetDetail {
    pub id: Uuid,
    pub filename: String,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
    pub summary: Option<DatasetSummary>,
    pub items: Vec<EquipmentItem>,
}

/// Response from deleting a dataset
#[derive(Debug, Deserialize)]
pub struct DeleteReceipt {
    pub id: Uuid,
    pub items_deleted: u64,
}
