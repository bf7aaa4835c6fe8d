//! Configuration file support.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! search_base = "https://openlibrary.org"
//! covers_base = "https://covers.openlibrary.org"
//! site_base = "https://openlibrary.org"
//! timeout_secs = 30
//!
//! [search]
//! debounce_ms = 300
//! default_field = "title"
//!
//! [logging]
//! level = "info"
//! file = "/tmp/book-finder.log"
//! ```

use std::path::{Path, PathBuf};

use crate::config::Config;

/// File name looked up in the working directory
const LOCAL_CONFIG_FILE: &str = "book-finder.toml";

/// Default per-user location, e.g. `~/.config/book-finder/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("book-finder").join("config.toml"))
}

/// Find a configuration file in the working directory or the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    default_config_path().filter(|path| path.is_file())
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        toml::from_str(content).map_err(|e| ConfigFileError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }

    /// Write the default configuration to `path`; an existing file is only
    /// replaced with `force`
    pub fn init_file(path: &Path, force: bool) -> Result<(), ConfigFileError> {
        if path.exists() && !force {
            return Err(ConfigFileError::Exists(path.to_path_buf()));
        }
        Config::default().save(path)
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("{} already exists (use --force to overwrite)", .0.display())]
    Exists(PathBuf),
}
