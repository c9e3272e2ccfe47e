//! EPD CLI Library
//!
//! Command-line client for the EPD server.
//!
//! # Overview
//!
//! - **Upload**: Ingest a local CSV file as a new dataset (`epd upload`)
//! - **Listing**: Recent datasets with their summaries (`epd list`)
//! - **Inspection**: One dataset with all items (`epd show`)
//! - **Charts**: Per-type mean measures (`epd chart`)
//! - **Deletion**: Remove a dataset and its items (`epd delete`)
//! - **Status**: Server connectivity check (`epd status`)
//! - **Configuration**: Persist server URL and API token (`epd config`)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

/// EPD - Equipment Process Data client
#[derive(Parser, Debug)]
#[command(name = "epd")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Server URL (falls back to the config file, then the default)
    #[arg(long, env = "EPD_SERVER_URL", global = true)]
    pub server_url: Option<String>,

    /// API token (falls back to the config file)
    #[arg(long, env = "EPD_API_TOKEN", global = true)]
    pub token: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a CSV file as a new dataset
    Upload {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// List recent datasets
    List {
        /// Maximum number of datasets to return
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Show one dataset with its items
    Show {
        /// Dataset id
        id: Uuid,
    },

    /// Show chart-ready per-type averages for a dataset
    Chart {
        /// Dataset id
        id: Uuid,
    },

    /// Delete a dataset and all its items
    Delete {
        /// Dataset id
        id: Uuid,
    },

    /// Check server connectivity
    Status,

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set the server URL
    SetServer {
        /// Server base URL, e.g. http://localhost:8000
        url: String,
    },
    /// Set the API token
    SetToken {
        /// Bearer token accepted by the server
        token: String,
    },
    /// Show the current configuration
    Show,
}
