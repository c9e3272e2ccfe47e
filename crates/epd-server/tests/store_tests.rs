//! Dataset store integration tests
//!
//! These run against a per-test SQLite database created by `#[sqlx::test]`,
//! with the workspace migrations applied automatically.

use epd_common::types::{Dataset, EquipmentRecord};
use epd_server::ingest::aggregator;
use epd_server::store::{self, StoreError, RETENTION_LIMIT};
use sqlx::SqlitePool;
use uuid::Uuid;

fn record(name: &str, kind: &str, flowrate: f64, pressure: f64, temperature: f64) -> EquipmentRecord {
    EquipmentRecord {
        equipment_name: name.to_string(),
        equipment_type: kind.to_string(),
        flowrate,
        pressure,
        temperature,
    }
}

fn sample_records() -> Vec<EquipmentRecord> {
    vec![
        record("Pump-1", "Pump", 10.0, 2.0, 25.0),
        record("Pump-2", "Pump", 20.0, 4.0, 35.0),
        record("Valve-1", "Valve", 5.0, 1.0, 20.0),
    ]
}

/// Create a dataset with items and summary the way the pipeline does:
/// everything inside one transaction.
async fn seed_dataset(pool: &SqlitePool, filename: &str, records: &[EquipmentRecord]) -> Dataset {
    let mut tx = pool.begin().await.unwrap();
    let dataset = store::insert_dataset(&mut tx, filename, "cafebabe").await.unwrap();
    store::insert_items(&mut tx, dataset.id, records).await.unwrap();
    let summary = aggregator::summarize(records);
    store::write_summary(&mut tx, dataset.id, &summary).await.unwrap();
    tx.commit().await.unwrap();
    dataset
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_and_get_dataset(pool: SqlitePool) {
    let created = seed_dataset(&pool, "equipment.csv", &sample_records()).await;

    let fetched = store::get_dataset(&pool, created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.filename, "equipment.csv");
    assert_eq!(fetched.checksum, "cafebabe");

    let summary = fetched.summary.unwrap();
    assert_eq!(summary.total_equipment_count, 3);
    assert_eq!(summary.average_flowrate, 11.67);

    let items = store::items_for_dataset(&pool, created.id).await.unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].equipment_name, "Pump-1");
    assert_eq!(items[2].equipment_type, "Valve");
    assert!(items.iter().all(|item| item.dataset_id == created.id));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_get_unknown_dataset_is_not_found(pool: SqlitePool) {
    let result = store::get_dataset(&pool, Uuid::new_v4()).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_recent_orders_newest_first(pool: SqlitePool) {
    let first = seed_dataset(&pool, "first.csv", &sample_records()).await;
    let second = seed_dataset(&pool, "second.csv", &sample_records()).await;
    let third = seed_dataset(&pool, "third.csv", &sample_records()).await;

    let listed = store::list_recent(&pool, 2).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, third.id);
    assert_eq!(listed[1].id, second.id);

    let all = store::list_recent(&pool, 100).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].id, first.id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_is_idempotent_without_writes(pool: SqlitePool) {
    seed_dataset(&pool, "a.csv", &sample_records()).await;
    seed_dataset(&pool, "b.csv", &sample_records()).await;

    let first: Vec<Uuid> = store::list_recent(&pool, 10)
        .await
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    let second: Vec<Uuid> = store::list_recent(&pool, 10)
        .await
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();

    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_write_summary_for_unknown_dataset_is_not_found(pool: SqlitePool) {
    let summary = aggregator::summarize(&sample_records());
    let mut conn = pool.acquire().await.unwrap();
    let result = store::write_summary(&mut conn, Uuid::new_v4(), &summary).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_cascades_to_items(pool: SqlitePool) {
    let dataset = seed_dataset(&pool, "equipment.csv", &sample_records()).await;

    let items_deleted = store::delete_dataset(&pool, dataset.id).await.unwrap();
    assert_eq!(items_deleted, 3);

    let items = store::items_for_dataset(&pool, dataset.id).await.unwrap();
    assert!(items.is_empty());

    let result = store::get_dataset(&pool, dataset.id).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_second_delete_is_not_found(pool: SqlitePool) {
    let dataset = seed_dataset(&pool, "equipment.csv", &sample_records()).await;

    store::delete_dataset(&pool, dataset.id).await.unwrap();
    let result = store::delete_dataset(&pool, dataset.id).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_unknown_dataset_is_not_found(pool: SqlitePool) {
    let result = store::delete_dataset(&pool, Uuid::new_v4()).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_evict_beyond_retention_keeps_newest(pool: SqlitePool) {
    let mut created = Vec::new();
    for i in 0..7 {
        created.push(seed_dataset(&pool, &format!("upload-{i}.csv"), &sample_records()).await);
    }

    let mut tx = pool.begin().await.unwrap();
    let evicted = store::evict_beyond_retention(&mut tx, RETENTION_LIMIT).await.unwrap();
    tx.commit().await.unwrap();

    // The two oldest are gone, items included
    assert_eq!(evicted.len(), 2);
    assert!(evicted.contains(&created[0].id));
    assert!(evicted.contains(&created[1].id));
    for id in &evicted {
        let items = store::items_for_dataset(&pool, *id).await.unwrap();
        assert!(items.is_empty());
    }

    assert_eq!(store::count_datasets(&pool).await.unwrap(), RETENTION_LIMIT);

    let survivors = store::list_recent(&pool, 100).await.unwrap();
    let survivor_ids: Vec<Uuid> = survivors.iter().map(|d| d.id).collect();
    let expected: Vec<Uuid> = created[2..].iter().rev().map(|d| d.id).collect();
    assert_eq!(survivor_ids, expected);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_evict_is_noop_under_retention(pool: SqlitePool) {
    for i in 0..3 {
        seed_dataset(&pool, &format!("upload-{i}.csv"), &sample_records()).await;
    }

    let mut tx = pool.begin().await.unwrap();
    let evicted = store::evict_beyond_retention(&mut tx, RETENTION_LIMIT).await.unwrap();
    tx.commit().await.unwrap();

    assert!(evicted.is_empty());
    assert_eq!(store::count_datasets(&pool).await.unwrap(), 3);
}
