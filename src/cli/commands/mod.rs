//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the repository selection (flags, then config file)
//! 2. Drives the store
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Every command talks to the backend, so each handler builds a tokio
//! runtime and blocks on its async body.

mod health;
mod info;
mod log_cmd;

pub use health::health;
pub use info::info;
pub use log_cmd::log;

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::backend::HttpBackend;
use crate::cli::args::Command;
use crate::core::config::Config;
use crate::core::types::RepoConfig;
use crate::store::RepoStore;
use crate::ui::output::Verbosity;

/// Settings shared by all command handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded client configuration
    pub config: Config,
    /// `--api-base` override
    pub api_base: Option<String>,
    pub verbosity: Verbosity,
    /// Emit JSON instead of text
    pub json: bool,
}

impl Context {
    /// API base after applying the command-line override.
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or_else(|| self.config.api_base())
    }

    /// Build a store backed by the HTTP API.
    pub fn store(&self) -> Result<RepoStore> {
        let backend = match self.config.timeout() {
            Some(timeout) => HttpBackend::with_timeout(self.api_base(), timeout)?,
            None => HttpBackend::with_api_base(self.api_base()),
        };
        Ok(RepoStore::new(Arc::new(backend)))
    }

    /// Resolve the repository to inspect; flags win over the config file.
    pub fn repo_config(&self, repo: Option<String>, max_count: Option<i64>) -> Result<RepoConfig> {
        let path = match repo.or_else(|| self.config.repo_path().map(str::to_string)) {
            Some(path) => path,
            None => bail!("no repository given; pass --repo or set repo.path in the config file"),
        };
        Ok(RepoConfig::new(
            path,
            max_count.unwrap_or_else(|| self.config.max_count()),
        ))
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Health => health::health(ctx),
        Command::Log {
            repo,
            max_count,
            by_date,
            authors,
        } => log_cmd::log(ctx, repo, max_count, by_date, authors),
        Command::Info { repo } => info::info(ctx, repo),
    }
}
