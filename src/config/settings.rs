//! User settings and preferences
//!
//! Manages application settings stored in ~/.pgsearch/config.toml

use crate::config::ConnectionConfig;
use crate::config::connections::SslMode;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub connection: ConnectionSettings,

    #[serde(default)]
    pub search: SearchSettings,
}

/// Where to connect; credentials are never stored here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default)]
    pub ssl_mode: SslMode,
}

/// Display limits for search results and previews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Comments longer than this many characters are cut with "..."
    #[serde(default = "default_comment_max_chars")]
    pub comment_max_chars: usize,

    /// Number of rows fetched by the data preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

fn default_host() -> String {
    "192.168.1.7".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_database() -> String {
    "EPLoire".to_string()
}

fn default_comment_max_chars() -> usize {
    50
}

fn default_preview_rows() -> usize {
    20
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            ssl_mode: SslMode::default(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            comment_max_chars: default_comment_max_chars(),
            preview_rows: default_preview_rows(),
        }
    }
}

/// Load settings from the default config file
pub fn load_settings() -> ConfigResult<Settings> {
    let path = ConnectionConfig::config_dir()?.join("config.toml");
    load_settings_from(&path)
}

/// Load settings from a specific file; a missing file yields the defaults
pub fn load_settings_from(path: &Path) -> ConfigResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::NotFound(format!("{}: {}", path.display(), e)))?;
    let settings: Settings = toml::from_str(&content)?;
    if settings.search.preview_rows == 0 {
        return Err(ConfigError::Invalid(
            "search.preview_rows must be at least 1".to_string(),
        ));
    }
    Ok(settings)
}
