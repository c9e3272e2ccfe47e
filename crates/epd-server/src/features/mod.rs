//! Feature modules implementing the EPD API
//!
//! Each feature is organized as a vertical slice with its own commands
//! (write operations), queries (read operations), and routes.
//!
//! # Features
//!
//! - **datasets**: CSV upload ingestion, dataset listing/detail, chart
//!   aggregates, and deletion

pub mod datasets;

use axum::Router;
use sqlx::SqlitePool;

/// Creates the main API router with all feature routes mounted
///
/// # Arguments
///
/// * `db` - SQLite connection pool shared by all handlers
pub fn router(db: SqlitePool) -> Router<()> {
    Router::new().nest("/datasets", datasets::datasets_routes().with_state(db))
}
