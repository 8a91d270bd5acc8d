//! backend::http
//!
//! HTTP implementation of [`Backend`] using reqwest.
//!
//! # Endpoints
//!
//! - `POST {base}/git-log` with `{ repo_path, max_count? }`
//! - `POST {base}/repository-info` with `{ repo_path }`
//! - `GET {base}/health`
//!
//! # Error Mapping
//!
//! The backend answers validation and internal errors with a non-2xx
//! status *and* the usual JSON envelope. When a non-2xx body carries an
//! `error` message that message wins; any other non-2xx reply (HTML,
//! `{"message": ...}`, `{"success": false}`) becomes `BackendError::Status`.
//!
//! # Example
//!
//! ```ignore
//! use gitscope::backend::{Backend, GitLogRequest, HttpBackend};
//!
//! let backend = HttpBackend::new();
//! let log = backend.git_log(GitLogRequest {
//!     repo_path: "/srv/repo".to_string(),
//!     max_count: Some(100),
//! }).await?;
//! println!("{} commits", log.commits.len());
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{
    ApiEnvelope, Backend, BackendError, GitLog, GitLogRequest, HealthStatus, RepoInfoRequest,
};
use crate::core::types::RepoInfo;

/// Error part of an envelope, decoded without the payload type.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Default git-log API base URL.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// HTTP client for making requests
    client: Client,
    /// API base URL, without trailing slash
    api_base: String,
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpBackend {
    /// Create a backend talking to `http://localhost:5000/api`.
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Create a backend with a custom API base URL.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_base)
    }

    /// Create a backend whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Network` if the HTTP client cannot be built.
    pub fn with_timeout(
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Ok(Self::with_client(client, api_base))
    }

    /// Create a backend from a preconfigured client.
    pub fn with_client(client: Client, api_base: impl Into<String>) -> Self {
        let api_base: String = api_base.into();
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Get the API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build URL for an API endpoint.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    /// POST a JSON body and unwrap the response envelope.
    async fn post_envelope<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::handle_envelope(response).await
    }

    /// Map a response carrying an [`ApiEnvelope`] to its payload.
    ///
    /// A non-2xx reply is `Rejected` only when its body carries an `error`
    /// message; any other non-2xx body is a bare `Status`.
    async fn handle_envelope<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error)
                .filter(|m| !m.is_empty());
            return Err(match message {
                Some(message) => BackendError::Rejected {
                    message: Some(message),
                },
                None => BackendError::Status(status.as_u16()),
            });
        }

        serde_json::from_slice::<ApiEnvelope<T>>(&bytes)
            .map_err(|e| BackendError::Decode(e.to_string()))?
            .into_result()
    }

    /// Map a plain JSON response (no envelope).
    async fn handle_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn git_log(&self, request: GitLogRequest) -> Result<GitLog, BackendError> {
        self.post_envelope("git-log", &request).await
    }

    async fn repository_info(&self, request: RepoInfoRequest) -> Result<RepoInfo, BackendError> {
        self.post_envelope("repository-info", &request).await
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let url = self.endpoint("health");
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Self::handle_json(response).await
    }
}
