//! Configuration management for the EPD CLI
//!
//! Persists the server URL and API token to
//! `<config dir>/epd/config.toml`. Command-line flags and environment
//! variables always take precedence over the file.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default EPD server URL when not specified anywhere.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// On-disk CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// EPD server URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// API token presented as a bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl CliConfig {
    /// Path of the config file
    pub fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Could not determine config directory".to_string()))?
            .join("epd");
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location; a missing file yields the defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Save to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Effective settings after combining flags, environment, and the file
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
    pub token: Option<String>,
}

impl Settings {
    /// Resolve settings with flag/env values taking precedence over the
    /// config file, which takes precedence over the default.
    pub fn resolve(
        cli_server_url: Option<String>,
        cli_token: Option<String>,
        file: &CliConfig,
    ) -> Self {
        Self {
            server_url: cli_server_url
                .or_else(|| file.server_url.clone())
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            token: cli_token.or_else(|| file.token.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.server_url.is_none());
        assert!(config.token.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = CliConfig {
            server_url: Some("http://epd.example.com".to_string()),
            token: Some("secret".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = CliConfig::load_from(&path).unwrap();
        assert_eq!(loaded.server_url.as_deref(), Some("http://epd.example.com"));
        assert_eq!(loaded.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_settings_precedence() {
        let file = CliConfig {
            server_url: Some("http://from-file".to_string()),
            token: Some("file-token".to_string()),
        };

        let settings = Settings::resolve(Some("http://from-flag".to_string()), None, &file);
        assert_eq!(settings.server_url, "http://from-flag");
        assert_eq!(settings.token.as_deref(), Some("file-token"));

        let settings = Settings::resolve(None, None, &CliConfig::default());
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
        assert!(settings.token.is_none());
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server_url = [not valid").unwrap();
        assert!(matches!(
            CliConfig::load_from(&path),
            Err(CliError::TomlParse(_))
        ));
    }
}
