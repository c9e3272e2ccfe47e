//! EPD Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the EPD project.
//!
//! # Overview
//!
//! This crate provides common functionality used across all EPD workspace
//! members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Centralized tracing initialization
//! - **Checksums**: Upload integrity utilities
//! - **Types**: Wire-stable domain types (datasets, items, summaries)

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{EpdError, Result};
