//! Ingestion pipeline
//!
//! Orchestrates one upload end to end:
//! parse → validate → persist → summarize → evict. Persist, summarize, and
//! evict run inside a single transaction, so a reader can never observe a
//! dataset without its items or summary, or more than the retention limit
//! of datasets after a commit.

use epd_common::checksum::checksum_bytes;
use epd_common::types::{EquipmentRecord, IngestReceipt};
use sqlx::SqlitePool;

use super::{aggregator, parser, validator, IngestError};
use crate::store::{self, StoreError};

/// Pipeline stages, in order. Used for structured logging; a failure at any
/// stage aborts the remaining ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Parsed,
    Validated,
    Persisted,
    Summarized,
    Evicted,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Parsed => "parsed",
            Stage::Validated => "validated",
            Stage::Persisted => "persisted",
            Stage::Summarized => "summarized",
            Stage::Evicted => "evicted",
            Stage::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// Whether the declared filename carries a `.csv` extension.
///
/// A cheap, deliberately shallow check; the parser decides whether the
/// bytes are actually CSV.
fn has_csv_extension(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Ingest one CSV upload.
///
/// Returns the new dataset's identity, creation timestamp, and summary. On
/// any failure nothing is persisted.
#[tracing::instrument(skip(pool, bytes), fields(filename = %filename, size = bytes.len()))]
pub async fn run(
    pool: &SqlitePool,
    filename: &str,
    bytes: &[u8],
) -> Result<IngestReceipt, IngestError> {
    if !has_csv_extension(filename) {
        return Err(IngestError::Format(filename.to_string()));
    }
    tracing::debug!(stage = %Stage::Received, "upload accepted");

    let table = parser::parse_csv(bytes)?;
    tracing::debug!(stage = %Stage::Parsed, rows = table.rows.len(), "table parsed");

    let records = validator::validate(&table)?;
    tracing::debug!(stage = %Stage::Validated, records = records.len(), "rows validated");

    let checksum = checksum_bytes(bytes);

    let mut tx = pool.begin().await.map_err(StoreError::from)?;

    let dataset = store::insert_dataset(&mut tx, filename, &checksum).await?;
    store::insert_items(&mut tx, dataset.id, &records).await?;
    tracing::debug!(stage = %Stage::Persisted, dataset_id = %dataset.id, "dataset persisted");

    // The summary is a pure function of the items at creation time; read
    // them back inside the transaction and aggregate over what was stored.
    let items = store::items_for_dataset(&mut *tx, dataset.id).await?;
    let item_records: Vec<EquipmentRecord> = items.iter().map(|item| item.record()).collect();
    let summary = aggregator::summarize(&item_records);
    store::write_summary(&mut tx, dataset.id, &summary).await?;
    tracing::debug!(
        stage = %Stage::Summarized,
        dataset_id = %dataset.id,
        total = summary.total_equipment_count,
        "summary written"
    );

    let evicted = store::evict_beyond_retention(&mut tx, store::RETENTION_LIMIT).await?;

    tx.commit().await.map_err(StoreError::from)?;
    tracing::debug!(stage = %Stage::Evicted, evicted = evicted.len(), "retention enforced");

    tracing::info!(
        stage = %Stage::Done,
        dataset_id = %dataset.id,
        items = items.len(),
        "ingestion complete"
    );

    Ok(IngestReceipt {
        id: dataset.id,
        filename: dataset.filename,
        created_at: dataset.created_at,
        item_count: items.len() as i64,
        summary,
    })
}
