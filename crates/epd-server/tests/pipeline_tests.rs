//! Ingestion pipeline integration tests
//!
//! Drive the full parse → validate → persist → summarize → evict unit
//! against a per-test SQLite database and verify the externally observable
//! guarantees: atomicity, summary numbers, and the retention window.

use epd_common::checksum::checksum_bytes;
use epd_server::features::datasets::queries::{chart_data, ChartDataQuery};
use epd_server::ingest::{pipeline, IngestError};
use epd_server::store;
use sqlx::SqlitePool;

const VALID_CSV: &str = "\
Equipment Name,Type,Flowrate,Pressure,Temperature
Pump-1,Pump,10.0,2.0,25.0
Pump-2,Pump,20.0,4.0,35.0
Valve-1,Valve,5.0,1.0,20.0
";

#[sqlx::test(migrations = "../../migrations")]
async fn test_ingest_then_get_returns_every_row(pool: SqlitePool) {
    let receipt = pipeline::run(&pool, "equipment.csv", VALID_CSV.as_bytes())
        .await
        .unwrap();

    assert_eq!(receipt.filename, "equipment.csv");
    assert_eq!(receipt.item_count, 3);

    let dataset = store::get_dataset(&pool, receipt.id).await.unwrap();
    assert_eq!(dataset.id, receipt.id);
    assert_eq!(dataset.filename, "equipment.csv");

    let items = store::items_for_dataset(&pool, receipt.id).await.unwrap();
    assert_eq!(items.len(), 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_summary_numbers_for_known_rows(pool: SqlitePool) {
    let receipt = pipeline::run(&pool, "equipment.csv", VALID_CSV.as_bytes())
        .await
        .unwrap();

    let summary = &receipt.summary;
    assert_eq!(summary.total_equipment_count, 3);
    assert_eq!(summary.average_flowrate, 11.67);
    assert_eq!(summary.equipment_type_distribution.get("Pump"), Some(&2));
    assert_eq!(summary.equipment_type_distribution.get("Valve"), Some(&1));

    // The persisted summary matches what the receipt reported
    let dataset = store::get_dataset(&pool, receipt.id).await.unwrap();
    assert_eq!(dataset.summary.as_ref(), Some(summary));

    // Count always equals the distribution sum
    let distributed: i64 = summary.equipment_type_distribution.values().sum();
    assert_eq!(summary.total_equipment_count, distributed);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_chart_data_for_known_rows(pool: SqlitePool) {
    let receipt = pipeline::run(&pool, "equipment.csv", VALID_CSV.as_bytes())
        .await
        .unwrap();

    let chart = chart_data::handle(pool, ChartDataQuery { id: receipt.id })
        .await
        .unwrap();

    assert_eq!(chart.labels, vec!["Pump", "Valve"]);
    assert_eq!(chart.flowrate, vec![15.0, 5.0]);
    assert_eq!(chart.pressure, vec![3.0, 1.0]);
    assert_eq!(chart.temperature, vec![30.0, 20.0]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_checksum_matches_uploaded_bytes(pool: SqlitePool) {
    let receipt = pipeline::run(&pool, "equipment.csv", VALID_CSV.as_bytes())
        .await
        .unwrap();

    let dataset = store::get_dataset(&pool, receipt.id).await.unwrap();
    assert_eq!(dataset.checksum, checksum_bytes(VALID_CSV.as_bytes()));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_missing_column_rejected_without_persisting(pool: SqlitePool) {
    let csv = "Equipment Name,Type,Flowrate,Pressure\nPump-1,Pump,10.0,2.0\n";

    let result = pipeline::run(&pool, "equipment.csv", csv.as_bytes()).await;
    match result {
        Err(IngestError::Schema { missing, found }) => {
            assert_eq!(missing, vec!["Temperature"]);
            assert!(found.contains(&"Pressure".to_string()));
        },
        other => panic!("expected schema error, got {other:?}"),
    }

    assert_eq!(store::count_datasets(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_non_numeric_cell_reports_row_number(pool: SqlitePool) {
    let csv = "\
Equipment Name,Type,Flowrate,Pressure,Temperature
Pump-1,Pump,10.0,2.0,25.0
Pump-2,Pump,not-a-number,4.0,35.0
";

    let result = pipeline::run(&pool, "equipment.csv", csv.as_bytes()).await;
    match result {
        Err(IngestError::Content { violations, total }) => {
            assert_eq!(total, 1);
            assert_eq!(violations, vec!["Row 3: Flowrate must be a finite number"]);
        },
        other => panic!("expected content error, got {other:?}"),
    }

    assert_eq!(store::count_datasets(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_header_only_upload_is_empty_input(pool: SqlitePool) {
    let csv = "Equipment Name,Type,Flowrate,Pressure,Temperature\n";

    let result = pipeline::run(&pool, "equipment.csv", csv.as_bytes()).await;
    assert!(matches!(result, Err(IngestError::EmptyInput)));

    assert_eq!(store::count_datasets(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_wrong_extension_rejected_before_parsing(pool: SqlitePool) {
    let result = pipeline::run(&pool, "equipment.xlsx", VALID_CSV.as_bytes()).await;
    assert!(matches!(result, Err(IngestError::Format(_))));

    assert_eq!(store::count_datasets(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_retention_window_after_six_ingestions(pool: SqlitePool) {
    for i in 1..=6 {
        pipeline::run(&pool, &format!("upload-{i}.csv"), VALID_CSV.as_bytes())
            .await
            .unwrap();
    }

    let datasets = store::list_recent(&pool, 100).await.unwrap();
    assert_eq!(datasets.len(), 5);

    // The five most recent survive, newest first; the first upload is gone.
    let filenames: Vec<&str> = datasets.iter().map(|d| d.filename.as_str()).collect();
    assert_eq!(
        filenames,
        vec![
            "upload-6.csv",
            "upload-5.csv",
            "upload-4.csv",
            "upload-3.csv",
            "upload-2.csv"
        ]
    );

    // Evicted items went with their dataset: only 5 * 3 rows remain.
    let remaining_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining_items, 15);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_rejected_upload_leaves_prior_state_intact(pool: SqlitePool) {
    let receipt = pipeline::run(&pool, "good.csv", VALID_CSV.as_bytes())
        .await
        .unwrap();

    let bad = "Equipment Name,Type,Flowrate,Pressure,Temperature\n,,x,y,z\n";
    let result = pipeline::run(&pool, "bad.csv", bad.as_bytes()).await;
    assert!(matches!(result, Err(IngestError::Content { .. })));

    // The earlier dataset is untouched and still queryable.
    assert_eq!(store::count_datasets(&pool).await.unwrap(), 1);
    let dataset = store::get_dataset(&pool, receipt.id).await.unwrap();
    assert_eq!(dataset.filename, "good.csv");
}
