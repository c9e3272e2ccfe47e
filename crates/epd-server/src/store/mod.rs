//! Dataset store
//!
//! Persistence layer for datasets and their equipment items over SQLite.
//!
//! Write steps that must compose into one atomic unit
//! ([`insert_dataset`], [`insert_items`], [`write_summary`],
//! [`evict_beyond_retention`]) take `&mut SqliteConnection` so the ingestion
//! pipeline can run them inside a single transaction. Standalone operations
//! take the pool and manage their own transaction where needed.
//!
//! Recency is total: datasets are ordered by `created_at` descending with
//! the insertion sequence (`seq`) as tie-break, so two uploads landing
//! within the same clock tick still have a well-defined order.

use chrono::{DateTime, Utc};
use epd_common::types::{Dataset, DatasetSummary, EquipmentItem, EquipmentRecord};
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;
use uuid::Uuid;

/// Maximum number of datasets kept live after an ingestion completes
pub const RETENTION_LIMIT: i64 = 5;

/// Errors surfaced by the dataset store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Dataset not found: {0}")]
    NotFound(Uuid),

    #[error("Stored summary payload is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Database record for a dataset row
#[derive(Debug, sqlx::FromRow)]
struct DatasetRow {
    id: Uuid,
    filename: String,
    checksum: String,
    created_at: DateTime<Utc>,
    summary_json: Option<String>,
}

impl DatasetRow {
    fn into_dataset(self) -> Result<Dataset, StoreError> {
        let summary = match self.summary_json {
            Some(raw) => Some(serde_json::from_str::<DatasetSummary>(&raw)?),
            None => None,
        };
        Ok(Dataset {
            id: self.id,
            filename: self.filename,
            checksum: self.checksum,
            created_at: self.created_at,
            summary,
        })
    }
}

/// Database record for an equipment item row
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    dataset_id: Uuid,
    equipment_name: String,
    equipment_type: String,
    flowrate: f64,
    pressure: f64,
    temperature: f64,
    created_at: DateTime<Utc>,
}

impl From<ItemRow> for EquipmentItem {
    fn from(row: ItemRow) -> Self {
        EquipmentItem {
            id: row.id,
            dataset_id: row.dataset_id,
            equipment_name: row.equipment_name,
            equipment_type: row.equipment_type,
            flowrate: row.flowrate,
            pressure: row.pressure,
            temperature: row.temperature,
            created_at: row.created_at,
        }
    }
}

/// Insert a new dataset row with no summary yet.
///
/// Part of the atomic creation unit; callers run this inside a transaction
/// together with [`insert_items`] and [`write_summary`].
pub async fn insert_dataset(
    conn: &mut SqliteConnection,
    filename: &str,
    checksum: &str,
) -> Result<Dataset, StoreError> {
    let id = Uuid::new_v4();
    let created_at = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO datasets (id, filename, checksum, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(id)
    .bind(filename)
    .bind(checksum)
    .bind(created_at)
    .execute(&mut *conn)
    .await?;

    Ok(Dataset {
        id,
        filename: filename.to_string(),
        checksum: checksum.to_string(),
        created_at,
        summary: None,
    })
}

/// Bulk-insert the items of one dataset.
pub async fn insert_items(
    conn: &mut SqliteConnection,
    dataset_id: Uuid,
    records: &[EquipmentRecord],
) -> Result<(), StoreError> {
    for record in records {
        sqlx::query(
            r#"
            INSERT INTO equipment_items
                (id, dataset_id, equipment_name, equipment_type,
                 flowrate, pressure, temperature, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(dataset_id)
        .bind(&record.equipment_name)
        .bind(&record.equipment_type)
        .bind(record.flowrate)
        .bind(record.pressure)
        .bind(record.temperature)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Write the computed summary onto a dataset record.
///
/// Done exactly once per dataset, immediately after item creation, inside
/// the same transaction; the summary is immutable afterwards.
pub async fn write_summary(
    conn: &mut SqliteConnection,
    dataset_id: Uuid,
    summary: &DatasetSummary,
) -> Result<(), StoreError> {
    let payload = serde_json::to_string(summary)?;

    let result = sqlx::query("UPDATE datasets SET summary_json = ?1 WHERE id = ?2")
        .bind(payload)
        .bind(dataset_id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(dataset_id));
    }

    Ok(())
}

/// Delete every dataset beyond the `retention` most recently created,
/// cascading to their items. Returns the evicted dataset ids.
///
/// Runs inside the same transaction as the insert that may have pushed the
/// count over the limit, so readers never observe more than `retention`
/// datasets once that ingestion has committed.
pub async fn evict_beyond_retention(
    conn: &mut SqliteConnection,
    retention: i64,
) -> Result<Vec<Uuid>, StoreError> {
    let stale: Vec<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id FROM datasets
        ORDER BY created_at DESC, seq DESC
        LIMIT -1 OFFSET ?1
        "#,
    )
    .bind(retention)
    .fetch_all(&mut *conn)
    .await?;

    for id in &stale {
        sqlx::query("DELETE FROM equipment_items WHERE dataset_id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        sqlx::query("DELETE FROM datasets WHERE id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(stale)
}

/// Fetch one dataset by id.
pub async fn get_dataset(pool: &SqlitePool, id: Uuid) -> Result<Dataset, StoreError> {
    let row = sqlx::query_as::<_, DatasetRow>(
        r#"
        SELECT id, filename, checksum, created_at, summary_json
        FROM datasets
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.ok_or(StoreError::NotFound(id))?.into_dataset()
}

/// Fetch the items of one dataset, oldest-first.
pub async fn items_for_dataset<'e, E>(
    executor: E,
    dataset_id: Uuid,
) -> Result<Vec<EquipmentItem>, StoreError>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let rows = sqlx::query_as::<_, ItemRow>(
        r#"
        SELECT id, dataset_id, equipment_name, equipment_type,
               flowrate, pressure, temperature, created_at
        FROM equipment_items
        WHERE dataset_id = ?1
        ORDER BY seq ASC
        "#,
    )
    .bind(dataset_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(EquipmentItem::from).collect())
}

/// List datasets ordered by creation timestamp descending, capped at `limit`.
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Dataset>, StoreError> {
    let rows = sqlx::query_as::<_, DatasetRow>(
        r#"
        SELECT id, filename, checksum, created_at, summary_json
        FROM datasets
        ORDER BY created_at DESC, seq DESC
        LIMIT ?1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(DatasetRow::into_dataset).collect()
}

/// Delete one dataset and all its items. Returns the number of items
/// removed. A second call for the same id fails with [`StoreError::NotFound`].
pub async fn delete_dataset(pool: &SqlitePool, id: Uuid) -> Result<u64, StoreError> {
    let mut tx = pool.begin().await?;

    let items_deleted = sqlx::query("DELETE FROM equipment_items WHERE dataset_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let datasets_deleted = sqlx::query("DELETE FROM datasets WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if datasets_deleted == 0 {
        // Dropping the transaction rolls it back.
        return Err(StoreError::NotFound(id));
    }

    tx.commit().await?;

    Ok(items_deleted)
}

/// Total number of datasets currently persisted.
pub async fn count_datasets(pool: &SqlitePool) -> Result<i64, StoreError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
