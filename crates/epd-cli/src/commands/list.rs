//! `epd list` command implementation

use crate::api::ApiClient;
use crate::error::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

/// List recent datasets
pub async fn run(client: &ApiClient, limit: Option<i64>) -> Result<()> {
    let datasets = client.list_datasets(limit).await?;

    if datasets.is_empty() {
        println!("No datasets found.");
        println!("Run 'epd upload <file.csv>' to ingest one.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Filename", "Uploaded", "Items", "Avg Flowrate"]);

    for dataset in &datasets {
        let (items, avg_flowrate) = dataset
            .summary
            .as_ref()
            .map(|s| (s.total_equipment_count.to_string(), s.average_flowrate.to_string()))
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));

        table.add_row(vec![
            dataset.id.to_string(),
            dataset.filename.clone(),
            dataset.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            items,
            avg_flowrate,
        ]);
    }

    println!("{table}");
    println!("{} dataset(s)", datasets.len());

    Ok(())
}
