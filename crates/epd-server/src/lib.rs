//! EPD Server Library
//!
//! HTTP server for managing equipment process datasets.
//!
//! # Overview
//!
//! The EPD server ingests CSV uploads describing chemical-process equipment
//! and serves the derived datasets:
//!
//! - **Ingestion Core**: parse → validate → persist → summarize → evict,
//!   executed as one atomic unit per upload
//! - **Dataset Store**: transactional SQLite persistence with a bounded
//!   retention window (the 5 most recent datasets survive)
//! - **API Endpoints**: REST API for upload, listing, detail, chart
//!   aggregates, and deletion
//! - **Middleware**: CORS, request tracing, and a bearer-token gate
//!
//! # Architecture
//!
//! Read and write paths are kept separate in vertical feature slices:
//!
//! - **Commands** (write operations): upload a dataset, delete a dataset.
//!   All mutations to a dataset and its items run inside one transaction.
//! - **Queries** (read operations): list recent datasets, fetch one dataset
//!   with its items, fetch chart-ready per-type aggregates.
//!
//! # Example
//!
//! ```no_run
//! use epd_server::{api, config::Config};
//! use sqlx::sqlite::SqlitePoolOptions;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = SqlitePoolOptions::new().connect(&config.database.url).await?;
//!     let app = api::app(pool, &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod ingest;
pub mod middleware;
pub mod store;

// Re-export commonly used types
pub use error::AppError;
