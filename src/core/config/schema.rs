//! core::config::schema
//!
//! Client configuration schema.
//!
//! # Validation
//!
//! Values are validated after parsing: the API base must be an
//! http(s) URL and the timeout, when given, must be positive.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Client configuration file.
///
/// # Example
///
/// ```toml
/// api_base = "http://localhost:5000/api"
/// timeout_secs = 30
///
/// [repo]
/// path = "/home/me/src/project"
/// max_count = 500
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the git-log API
    pub api_base: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Default repository selection
    pub repo: Option<RepoDefaults>,
}

impl ClientConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.api_base {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "api_base must be an http(s) URL, got '{}'",
                    base
                )));
            }
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        if let Some(repo) = &self.repo {
            repo.validate()?;
        }

        Ok(())
    }
}

/// Default repository to inspect when none is given on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoDefaults {
    /// Repository path on the backend host
    pub path: Option<String>,

    /// Commit limit (zero or negative means unbounded)
    pub max_count: Option<i64>,
}

impl RepoDefaults {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "repo.path cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
