//! core::config
//!
//! Client configuration loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$GITSCOPE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitscope/config.toml`
//! 3. `~/.gitscope/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use gitscope::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("API base: {}", config.api_base());
//! if let Some(path) = config.repo_path() {
//!     println!("Default repository: {}", path);
//! }
//! ```

pub mod schema;

pub use schema::{ClientConfig, RepoDefaults};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::backend::DEFAULT_API_BASE;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GITSCOPE_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded client configuration with defaults applied by accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub client: ClientConfig,
    /// Path to the loaded config file (if any)
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read,
    /// parsed, or validated. A missing file is not an error.
    pub fn load() -> Result<Config, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let client: ClientConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        client.validate()?;

        Ok(Config {
            client,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gitscope/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".gitscope/config.toml"))
            .filter(|path| path.exists())
    }

    /// API base URL.
    ///
    /// Defaults to `http://localhost:5000/api`.
    pub fn api_base(&self) -> &str {
        self.client.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Request timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.client.timeout_secs.map(Duration::from_secs)
    }

    /// Default repository path, if configured.
    pub fn repo_path(&self) -> Option<&str> {
        self.client.repo.as_ref().and_then(|r| r.path.as_deref())
    }

    /// Default commit limit.
    ///
    /// Defaults to `0` (unbounded).
    pub fn max_count(&self) -> i64 {
        self.client
            .repo
            .as_ref()
            .and_then(|r| r.max_count)
            .unwrap_or(0)
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}
