//! backend::mock
//!
//! Mock backend implementation for deterministic testing.
//!
//! # Design
//!
//! The mock backend serves a canned commit log, repository info and health
//! status from memory. Every call is recorded so tests can verify exactly
//! what the store asked for, and any single operation can be configured to
//! fail.
//!
//! # Example
//!
//! ```
//! use gitscope::backend::mock::{MockBackend, MockOperation};
//! use gitscope::backend::{Backend, GitLogRequest};
//!
//! # tokio_test::block_on(async {
//! let backend = MockBackend::new();
//!
//! let log = backend.git_log(GitLogRequest {
//!     repo_path: "/repo".to_string(),
//!     max_count: None,
//! }).await.unwrap();
//! assert!(log.commits.is_empty());
//!
//! assert_eq!(backend.operations().len(), 1);
//! # });
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::traits::{
    Backend, BackendError, GitLog, GitLogRequest, HealthStatus, RepoInfoRequest,
};
use crate::core::types::{Commit, RepoInfo, Stats};

/// Mock backend for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockBackend {
    inner: Arc<Mutex<MockBackendInner>>,
}

#[derive(Debug)]
struct MockBackendInner {
    /// Log served by `git_log`.
    log: GitLog,
    /// Info served by `repository_info`; `None` answers with a rejection.
    repo_info: Option<RepoInfo>,
    /// Status string served by `health`.
    health: String,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail `git_log` with the given error.
    GitLog(BackendError),
    /// Fail `repository_info` with the given error.
    RepositoryInfo(BackendError),
    /// Fail `health` with the given error.
    Health(BackendError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    GitLog {
        repo_path: String,
        max_count: Option<u64>,
    },
    RepositoryInfo {
        repo_path: String,
    },
    Health,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a healthy mock backend with an empty log and no repo info.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockBackendInner {
                log: GitLog::default(),
                repo_info: None,
                health: HealthStatus::HEALTHY.to_string(),
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    /// Serve the given commits and stats from `git_log`.
    pub fn with_log(self, commits: Vec<Commit>, stats: Option<Stats>) -> Self {
        self.set_log(commits, stats);
        self
    }

    /// Serve the given repository info from `repository_info`.
    pub fn with_repo_info(self, info: RepoInfo) -> Self {
        self.lock().repo_info = Some(info);
        self
    }

    /// Report the given status string from `health`.
    pub fn with_health(self, status: impl Into<String>) -> Self {
        self.lock().health = status.into();
        self
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use gitscope::backend::mock::{FailOn, MockBackend};
    /// use gitscope::backend::BackendError;
    ///
    /// let backend = MockBackend::new()
    ///     .fail_on(FailOn::GitLog(BackendError::Status(503)));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    /// Replace the log served by later `git_log` calls.
    pub fn set_log(&self, commits: Vec<Commit>, stats: Option<Stats>) {
        self.lock().log = GitLog { commits, stats };
    }

    /// Configure a failure after construction.
    pub fn set_fail_on(&self, fail_on: FailOn) {
        self.lock().fail_on = Some(fail_on);
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        self.lock().operations.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockBackendInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn git_log(&self, request: GitLogRequest) -> Result<GitLog, BackendError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::GitLog {
            repo_path: request.repo_path,
            max_count: request.max_count,
        });

        if let Some(FailOn::GitLog(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        let mut log = inner.log.clone();
        if let Some(limit) = request.max_count {
            log.commits
                .truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(log)
    }

    async fn repository_info(&self, request: RepoInfoRequest) -> Result<RepoInfo, BackendError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::RepositoryInfo {
            repo_path: request.repo_path.clone(),
        });

        if let Some(FailOn::RepositoryInfo(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        inner.repo_info.clone().ok_or_else(|| BackendError::Rejected {
            message: Some(format!("not a git repository: {}", request.repo_path)),
        })
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Health);

        if let Some(FailOn::Health(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        Ok(HealthStatus {
            status: inner.health.clone(),
            message: None,
        })
    }
}
