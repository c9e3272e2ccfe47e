//! HTTP API access for the EPD server

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
