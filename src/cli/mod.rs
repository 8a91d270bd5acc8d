//! cli
//!
//! Command-line interface layer for gitscope.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the log subscriber
//! - Delegate to command handlers, which drive a [`crate::store::RepoStore`]
//!
//! # Architecture
//!
//! The CLI layer is thin. All fetching and derived data come from the
//! store; handlers only choose what to fetch and how to print it.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::{Context as _, Result};
use tracing::Level;

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug, cli.quiet);

    let config = Config::load().context("failed to load configuration")?;
    if let Some(path) = config.loaded_from() {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let ctx = commands::Context {
        config,
        api_base: cli.api_base,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
        json: cli.json,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install a stderr fmt subscriber.
///
/// Defaults to WARN so best-effort failures are visible; `--debug` shows
/// request tracing and `--quiet` keeps only errors.
fn init_logging(debug: bool, quiet: bool) {
    let level = if debug {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
