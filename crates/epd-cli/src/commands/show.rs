//! `epd show` command implementation

use crate::api::ApiClient;
use crate::error::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use epd_common::types::DatasetSummary;
use uuid::Uuid;

/// Show one dataset: summary plus every item
pub async fn run(client: &ApiClient, id: Uuid) -> Result<()> {
    let detail = client.get_dataset(id).await?;

    println!("{}", detail.filename.green().bold());
    println!("  ID:       {}", detail.id);
    println!("  Uploaded: {}", detail.created_at);
    println!("  Checksum: {}", &detail.checksum[..detail.checksum.len().min(16)]);
    println!();

    if let Some(ref summary) = detail.summary {
        print_summary(summary);
        println!();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Equipment Name", "Type", "Flowrate", "Pressure", "Temperature"]);

    for item in &detail.items {
        table.add_row(vec![
            item.equipment_name.clone(),
            item.equipment_type.clone(),
            item.flowrate.to_string(),
            item.pressure.to_string(),
            item.temperature.to_string(),
        ]);
    }

    println!("{table}");
    println!("{} item(s)", detail.items.len());

    Ok(())
}

/// Print the summary block shared by `show` and `upload`
pub fn print_summary(summary: &DatasetSummary) {
    println!("{}", "Summary:".cyan().bold());
    println!("  Total equipment: {}", summary.total_equipment_count);
    println!(
        "  Flowrate:    avg {:>8.2}  min {:>8.2}  max {:>8.2}",
        summary.average_flowrate, summary.min_flowrate, summary.max_flowrate
    );
    println!(
        "  Pressure:    avg {:>8.2}  min {:>8.2}  max {:>8.2}",
        summary.average_pressure, summary.min_pressure, summary.max_pressure
    );
    println!(
        "  Temperature: avg {:>8.2}  min {:>8.2}  max {:>8.2}",
        summary.average_temperature, summary.min_temperature, summary.max_temperature
    );
    println!("  Types:");
    for (kind, count) in &summary.equipment_type_distribution {
        println!("    {kind}: {count}");
    }
}
