//! Error types for the EPD CLI
//!
//! All errors are user-facing, with clear messages and a hint at how to
//! recover.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// The server answered with an error envelope
    #[error("Server error: {0}. Ensure the EPD server is running (check with 'epd status') and your token is valid.")]
    Api(String),

    /// Required file is missing
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// The server answered with something that is not a valid envelope
    #[error("Unexpected server response: {0}. The server may be a different version.")]
    InvalidResponse(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("Network request failed: {0}. Check your internet connection and server URL.")]
    Http(#[from] reqwest::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or run 'epd config show'.")]
    Config(String),

    /// Config file could not be parsed
    #[error("Failed to parse config file: {0}. Fix or delete the file and re-run 'epd config'.")]
    TomlParse(#[from] toml::de::Error),

    /// Config file could not be written
    #[error("Failed to serialize config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}
