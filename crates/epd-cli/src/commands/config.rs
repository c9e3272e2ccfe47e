//! `epd config` command implementation

use crate::config::{CliConfig, DEFAULT_SERVER_URL};
use crate::error::Result;
use crate::ConfigCommand;
use colored::Colorize;

/// Manage the on-disk CLI configuration
pub async fn run(command: &ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::SetServer { url } => {
            let mut config = CliConfig::load()?;
            config.server_url = Some(url.clone());
            let path = config.save()?;
            println!("Server URL saved to {}", path.display());
        },
        ConfigCommand::SetToken { token } => {
            let mut config = CliConfig::load()?;
            config.token = Some(token.clone());
            let path = config.save()?;
            println!("API token saved to {}", path.display());
        },
        ConfigCommand::Show => {
            let config = CliConfig::load()?;
            println!("{}", "CLI configuration".cyan().bold());
            println!(
                "  Server: {}",
                config
                    .server_url
                    .as_deref()
                    .unwrap_or(DEFAULT_SERVER_URL)
            );
            println!(
                "  Token:  {}",
                if config.token.is_some() { "set" } else { "not set" }
            );
            if let Ok(path) = CliConfig::path() {
                println!("  File:   {}", path.display());
            }
        },
    }

    Ok(())
}
