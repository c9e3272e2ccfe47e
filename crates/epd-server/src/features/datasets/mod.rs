//! Datasets feature slice
//!
//! Upload ingestion, listing, detail, chart aggregates, and deletion for
//! equipment datasets.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::datasets_routes;
