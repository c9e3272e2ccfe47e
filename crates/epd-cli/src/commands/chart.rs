//! `epd chart` command implementation
//!
//! Prints the chart view as a table: one row per equipment type with the
//! mean of each measure.

use crate::api::ApiClient;
use crate::error::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use uuid::Uuid;

/// Show chart-ready per-type averages for a dataset
pub async fn run(client: &ApiClient, id: Uuid) -> Result<()> {
    let chart = client.chart_data(id).await?;

    if chart.labels.is_empty() {
        println!("No chart data for dataset {id}.");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Type", "Avg Flowrate", "Avg Pressure", "Avg Temperature"]);

    for (idx, label) in chart.labels.iter().enumerate() {
        table.add_row(vec![
            label.clone(),
            chart.flowrate[idx].to_string(),
            chart.pressure[idx].to_string(),
            chart.temperature[idx].to_string(),
        ]);
    }

    println!("{table}");

    Ok(())
}
