//! EPD CLI - Main entry point

use clap::Parser;
use epd_cli::api::ApiClient;
use epd_cli::config::{CliConfig, Settings};
use epd_cli::{Cli, Commands};
use epd_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("epd-cli".to_string())
            .build()
    } else {
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("epd-cli".to_string())
            .build()
    };

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    // Initialize logging (ignore errors as the CLI should work without it)
    let _ = init_logging(&log_config);

    // Execute command
    let result = execute_command(cli).await;

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> epd_cli::Result<()> {
    // The config file is optional; flags and environment win over it.
    let file_config = CliConfig::load().unwrap_or_default();
    let settings = Settings::resolve(cli.server_url, cli.token, &file_config);
    let client = ApiClient::new(settings.server_url, settings.token)?;

    match cli.command {
        Commands::Upload { file } => epd_cli::commands::upload::run(&client, &file).await,
        Commands::List { limit } => epd_cli::commands::list::run(&client, limit).await,
        Commands::Show { id } => epd_cli::commands::show::run(&client, id).await,
        Commands::Chart { id } => epd_cli::commands::chart::run(&client, id).await,
        Commands::Delete { id } => epd_cli::commands::delete::run(&client, id).await,
        Commands::Status => epd_cli::commands::status::run(&client).await,
        Commands::Config { command } => epd_cli::commands::config::run(&command).await,
    }
}
