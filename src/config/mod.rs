//! Configuration management.
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! `BOOK_FINDER__<SECTION>__<KEY>` environment variables.

mod file_config;

pub use file_config::{default_config_path, find_config_file, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::SearchField;
use crate::session::DEFAULT_DEBOUNCE;
use crate::sources::{OpenLibrarySource, DEFAULT_API_BASE};
use crate::utils::{HttpClient, Links, DEFAULT_COVERS_BASE, DEFAULT_SITE_BASE, DEFAULT_TIMEOUT_SECS};

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "BOOK_FINDER";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote endpoints and HTTP settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote endpoints and HTTP settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host serving `search.json`
    #[serde(default = "default_search_base")]
    pub search_base: String,

    /// Host serving cover images
    #[serde(default = "default_covers_base")]
    pub covers_base: String,

    /// Host for per-book pages
    #[serde(default = "default_site_base")]
    pub site_base: String,

    /// Custom User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            search_base: default_search_base(),
            covers_base: default_covers_base(),
            site_base: default_site_base(),
            user_agent: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_search_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_covers_base() -> String {
    DEFAULT_COVERS_BASE.to_string()
}

fn default_site_base() -> String {
    DEFAULT_SITE_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Search behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Delay between the last keystroke and the request, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Field selected when the UI starts
    #[serde(default)]
    pub default_field: SearchField,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            default_field: SearchField::default(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when neither `-v` nor `RUST_LOG` is given
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write logs to this file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn links(&self) -> Links {
        Links::new(&self.api.covers_base, &self.api.site_base)
    }

    /// Build the shared HTTP client from the API settings
    pub fn http_client(&self) -> Result<HttpClient, reqwest::Error> {
        let user_agent = self.api.user_agent.clone().unwrap_or_else(|| {
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
        });
        HttpClient::with_options(&user_agent, self.timeout())
    }

    /// Build the Open Library source from the API settings
    pub fn source(&self) -> Result<OpenLibrarySource, reqwest::Error> {
        Ok(OpenLibrarySource::with_base_url(
            self.http_client()?,
            &self.api.search_base,
        ))
    }
}

/// Load configuration from a file, with environment overrides on top
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_source())
        .build()?
        .try_deserialize()
}

/// Get the configuration from defaults and environment variables only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(env_source())
        .build()?
        .try_deserialize()
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.search_base, "https://openlibrary.org");
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.default_field, SearchField::Title);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
search_base = "http://localhost:8080"
timeout_secs = 5

[search]
debounce_ms = 0
default_field = "author"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api.search_base, "http://localhost:8080");
        assert_eq!(config.api.covers_base, "https://covers.openlibrary.org");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.debounce(), Duration::ZERO);
        assert_eq!(config.search.default_field, SearchField::Author);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_links_follow_config() {
        let mut config = Config::default();
        config.api.covers_base = "http://covers.local".to_string();
        assert_eq!(
            config.links().cover(3, crate::utils::CoverSize::Small),
            "http://covers.local/b/id/3-S.jpg"
        );
    }
}
