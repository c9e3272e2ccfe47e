//! `epd status` command implementation

use crate::api::ApiClient;
use crate::config::CliConfig;
use crate::error::Result;
use colored::Colorize;

/// Check server connectivity and show the effective configuration
pub async fn run(client: &ApiClient) -> Result<()> {
    println!("{}", "EPD status".cyan().bold());
    println!("  Server:  {}", client.base_url());

    if let Ok(path) = CliConfig::path() {
        println!("  Config:  {}", path.display());
    }

    let healthy = client.health_check().await?;
    if healthy {
        println!("  Health:  {}", "reachable".green());
    } else {
        println!("  Health:  {}", "unreachable".red());
        println!();
        println!("Start the server with 'epd-server' or point the CLI at a");
        println!("running instance via --server-url or 'epd config set-server'.");
    }

    Ok(())
}
