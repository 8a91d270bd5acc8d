//! backend::traits
//!
//! Backend trait definition and wire types for the git-log API.
//!
//! # Design
//!
//! The `Backend` trait is async because every operation is a network
//! round-trip. Responses from the data endpoints share one envelope,
//! `{ success, data?, error? }`, which [`ApiEnvelope::into_result`] turns
//! into a `Result`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{Commit, RepoConfig, RepoInfo, Stats};

/// Errors from backend operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend answered but reported failure (`success: false`).
    #[error("{}", .message.as_deref().unwrap_or("request rejected by backend"))]
    Rejected {
        /// Error message from the response body, if any
        message: Option<String>,
    },

    /// Non-2xx reply without a structured body.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The request could not be completed.
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx reply whose body could not be understood.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Response envelope shared by `/git-log` and `/repository-info`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Convert the envelope into the payload or a `Rejected` error.
    pub fn into_result(self) -> Result<T, BackendError> {
        if !self.success {
            return Err(BackendError::Rejected {
                message: self.error,
            });
        }
        self.data
            .ok_or_else(|| BackendError::Decode("response is missing 'data'".to_string()))
    }
}

/// Body of `POST /git-log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitLogRequest {
    pub repo_path: String,
    /// Omitted entirely when the log is unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u64>,
}

impl From<&RepoConfig> for GitLogRequest {
    fn from(config: &RepoConfig) -> Self {
        Self {
            repo_path: config.path.clone(),
            max_count: config.limit(),
        }
    }
}

/// Body of `POST /repository-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoInfoRequest {
    pub repo_path: String,
}

impl From<&RepoConfig> for RepoInfoRequest {
    fn from(config: &RepoConfig) -> Self {
        Self {
            repo_path: config.path.clone(),
        }
    }
}

/// Payload of a successful `/git-log` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitLog {
    #[serde(default)]
    pub commits: Vec<Commit>,
    /// Some backend versions call this field `statistics`.
    #[serde(default, alias = "statistics")]
    pub stats: Option<Stats>,
}

/// Body of a `/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    /// Status string the backend reports when it is up.
    pub const HEALTHY: &'static str = "healthy";

    pub fn is_healthy(&self) -> bool {
        self.status == Self::HEALTHY
    }
}

/// A git-log API the store can fetch from.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so the store can share one
/// backend between concurrently running fetches.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short backend name for logs (e.g. "http", "mock").
    fn name(&self) -> &'static str;

    /// Fetch the commit log and aggregate statistics for a repository.
    ///
    /// # Errors
    ///
    /// - `Rejected` if the backend reported failure (bad path, not a repo)
    /// - `Status`, `Network`, `Decode` for transport-level failures
    async fn git_log(&self, request: GitLogRequest) -> Result<GitLog, BackendError>;

    /// Fetch repository identity (name, branch, remote).
    async fn repository_info(&self, request: RepoInfoRequest) -> Result<RepoInfo, BackendError>;

    /// Query backend health.
    async fn health(&self) -> Result<HealthStatus, BackendError>;
}
