//! `epd delete` command implementation

use crate::api::ApiClient;
use crate::error::Result;
use colored::Colorize;
use uuid::Uuid;

/// Delete a dataset and all its items
pub async fn run(client: &ApiClient, id: Uuid) -> Result<()> {
    let receipt = client.delete_dataset(id).await?;

    println!(
        "{} dataset {} ({} item(s) removed)",
        "Deleted".green().bold(),
        receipt.id,
        receipt.items_deleted
    );

    Ok(())
}
