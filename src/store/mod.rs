//! store
//!
//! Repository state store: the in-memory cache UI layers read from.
//!
//! # Design
//!
//! The store holds the latest fetched commit log, backend statistics and
//! repository info, plus `loading`/`error` status for display. It does no
//! Git work itself; every fetch goes through a [`Backend`].
//!
//! State sits behind a mutex that is only ever held between awaits, so
//! network actions take `&self` and can run concurrently (see
//! [`RepoStore::load_data`]). Derived views are computed on demand from
//! the current state.
//!
//! # Error Policy
//!
//! - Log fetch failures are returned to the caller *and* mirrored into
//!   [`RepoStore::error`].
//! - Repository info and health failures are contained: logged or turned
//!   into `false`, never returned, never written to the error state.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use gitscope::backend::mock::MockBackend;
//! use gitscope::core::types::RepoConfig;
//! use gitscope::store::RepoStore;
//!
//! # tokio_test::block_on(async {
//! let store = RepoStore::new(Arc::new(MockBackend::new()));
//! store.set_repo_config(RepoConfig::new("/repo", 100));
//! store.load_data().await.unwrap();
//!
//! assert!(!store.is_loading());
//! assert!(store.error().is_none());
//! # });
//! ```

pub mod views;

pub use views::TimeRange;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, warn};

use crate::backend::{Backend, BackendError, GitLogRequest, RepoInfoRequest};
use crate::core::types::{Commit, RepoConfig, RepoInfo, Stats};

/// Errors surfaced by store actions.
///
/// The `Display` text is exactly what the store writes into its `error`
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An action needing a repository ran before `set_repo_config`.
    #[error("repository config not set")]
    ConfigMissing,

    /// The backend reported failure with a message.
    #[error("{0}")]
    Server(String),

    /// The request could not be completed.
    #[error("{0}")]
    Transport(String),

    /// The backend reported failure without saying why.
    #[error("failed to fetch git log")]
    Unknown,
}

impl From<BackendError> for StoreError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Rejected {
                message: Some(message),
            } if !message.is_empty() => StoreError::Server(message),
            BackendError::Rejected { .. } => StoreError::Unknown,
            other => StoreError::Transport(other.to_string()),
        }
    }
}

/// Raw store state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Rows from the most recent successful log fetch, in backend order
    pub commits: Vec<Commit>,
    pub stats: Option<Stats>,
    pub repo_info: Option<RepoInfo>,
    pub repo_config: Option<RepoConfig>,
    /// True while a log fetch is in flight
    pub loading: bool,
    /// Message of the last failed log fetch
    pub error: Option<String>,
}

impl StoreState {
    pub fn has_data(&self) -> bool {
        views::has_data(&self.commits)
    }

    pub fn author_list(&self) -> Vec<String> {
        views::author_list(&self.commits)
    }

    pub fn commits_by_date(&self) -> BTreeMap<String, Vec<Commit>> {
        views::commits_by_date(&self.commits)
    }

    pub fn time_range(&self) -> Option<TimeRange> {
        views::time_range(&self.commits)
    }
}

/// Sets `loading` on creation and clears it on drop.
///
/// Dropping covers every exit from a fetch: success, error, or the
/// future itself being dropped mid-request.
struct LoadingGuard<'a> {
    state: &'a Mutex<StoreState>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a Mutex<StoreState>) -> Self {
        {
            let mut s = state.lock().unwrap_or_else(PoisonError::into_inner);
            s.loading = true;
            s.error = None;
        }
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .loading = false;
    }
}

/// Repository state store.
///
/// One store is created per session and shared by reference with whatever
/// presentation layer needs it.
pub struct RepoStore {
    backend: Arc<dyn Backend>,
    state: Mutex<StoreState>,
}

impl std::fmt::Debug for RepoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoStore")
            .field("backend", &self.backend.name())
            .field("state", &*self.lock())
            .finish()
    }
}

impl RepoStore {
    /// Create an empty store fetching through `backend`.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            state: Mutex::new(StoreState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// Consistent copy of the whole state.
    pub fn snapshot(&self) -> StoreState {
        self.lock().clone()
    }

    pub fn commits(&self) -> Vec<Commit> {
        self.lock().commits.clone()
    }

    pub fn stats(&self) -> Option<Stats> {
        self.lock().stats.clone()
    }

    pub fn repo_info(&self) -> Option<RepoInfo> {
        self.lock().repo_info.clone()
    }

    pub fn repo_config(&self) -> Option<RepoConfig> {
        self.lock().repo_config.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// True iff at least one row is held.
    pub fn has_data(&self) -> bool {
        self.lock().has_data()
    }

    /// Distinct authors, first appearance first.
    pub fn author_list(&self) -> Vec<String> {
        self.lock().author_list()
    }

    /// Commits grouped by date key.
    pub fn commits_by_date(&self) -> BTreeMap<String, Vec<Commit>> {
        self.lock().commits_by_date()
    }

    /// Earliest and latest commit time.
    ///
    /// `None` when the log is empty, and also when the log has rows but no
    /// real commit carries a parseable timestamp.
    pub fn time_range(&self) -> Option<TimeRange> {
        self.lock().time_range()
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Replace the repository configuration.
    ///
    /// No validation is done; the backend decides whether the path is usable.
    pub fn set_repo_config(&self, config: RepoConfig) {
        debug!(path = %config.path, max_count = config.max_count, "repo config set");
        self.lock().repo_config = Some(config);
    }

    fn require_config(&self) -> Result<RepoConfig, StoreError> {
        self.lock()
            .repo_config
            .clone()
            .ok_or(StoreError::ConfigMissing)
    }

    /// Fetch the commit log and statistics, replacing the held ones.
    ///
    /// On failure the held commits and stats are left untouched, the error
    /// message is recorded, and the error is returned. `loading` is true for
    /// the duration of the request and false afterwards in every case.
    ///
    /// # Errors
    ///
    /// - `ConfigMissing` before any request if no config is set
    /// - `Server` / `Unknown` if the backend reported failure
    /// - `Transport` if the request did not complete
    pub async fn fetch_git_log(&self) -> Result<(), StoreError> {
        let config = self.require_config()?;
        let _loading = LoadingGuard::begin(&self.state);

        let request = GitLogRequest::from(&config);
        debug!(
            backend = self.backend.name(),
            repo_path = %request.repo_path,
            max_count = ?request.max_count,
            "fetching git log"
        );

        match self.backend.git_log(request).await {
            Ok(log) => {
                debug!(commits = log.commits.len(), "git log replaced");
                let mut state = self.lock();
                state.commits = log.commits;
                state.stats = log.stats;
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from(err);
                self.lock().error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Fetch repository info, best effort.
    ///
    /// Backend failures are logged and swallowed; the held info and the
    /// error state are left untouched.
    ///
    /// # Errors
    ///
    /// Only `ConfigMissing`, before any request.
    pub async fn fetch_repo_info(&self) -> Result<(), StoreError> {
        let config = self.require_config()?;
        let request = RepoInfoRequest::from(&config);

        match self.backend.repository_info(request).await {
            Ok(info) => {
                debug!(name = %info.name, branch = %info.current_branch, "repo info replaced");
                self.lock().repo_info = Some(info);
            }
            Err(err) => {
                warn!(repo_path = %config.path, error = %err, "failed to fetch repository info");
            }
        }
        Ok(())
    }

    /// True iff the backend reports itself healthy. Never fails.
    pub async fn check_health(&self) -> bool {
        match self.backend.health().await {
            Ok(health) => health.is_healthy(),
            Err(err) => {
                debug!(error = %err, "health check failed");
                false
            }
        }
    }

    /// Drop all fetched data and the error, keeping the repo config.
    pub fn clear_data(&self) {
        let mut state = self.lock();
        state.commits.clear();
        state.stats = None;
        state.repo_info = None;
        state.error = None;
    }

    /// Fetch the log and repository info concurrently.
    ///
    /// Both requests are in flight before either completes. Only a log
    /// fetch failure is returned.
    pub async fn load_data(&self) -> Result<(), StoreError> {
        let (log, _info) = tokio::join!(self.fetch_git_log(), self.fetch_repo_info());
        log
    }
}
