//! `epd upload` command implementation

use crate::api::ApiClient;
use crate::error::{CliError, Result};
use colored::Colorize;
use std::path::Path;

/// Upload a CSV file as a new dataset and print the resulting summary
pub async fn run(client: &ApiClient, file: &Path) -> Result<()> {
    if !file.exists() {
        return Err(CliError::FileNotFound(file.display().to_string()));
    }

    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.csv".to_string());
    let content = std::fs::read(file)?;

    println!("Uploading {} ...", filename.cyan());

    let receipt = client.upload_dataset(&filename, content).await?;

    println!("{}", "Upload complete.".green().bold());
    println!("  Dataset:  {}", receipt.id);
    println!("  Uploaded: {}", receipt.created_at);
    println!("  Items:    {}", receipt.item_count);
    println!();
    super::show::print_summary(&receipt.summary);

    Ok(())
}
