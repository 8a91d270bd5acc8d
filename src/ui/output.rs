//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! Diagnostics go through `tracing`; this module only writes results.

use std::fmt::Display;

use crate::core::types::{Commit, RepoInfo, Stats};
use crate::store::TimeRange;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Format one log row.
///
/// Graph-only rows render as their graph annotation alone.
pub fn format_commit(commit: &Commit) -> String {
    let graph = commit.graph.as_deref().unwrap_or("");
    if !commit.is_real() {
        return graph.to_string();
    }

    let mut line = String::new();
    if !graph.is_empty() {
        line.push_str(graph);
        line.push(' ');
    }
    line.push_str(&commit.hash);
    if let Some(refs) = commit.refs.as_deref().filter(|r| !r.is_empty()) {
        line.push_str(&format!(" ({})", refs));
    }
    line.push_str(&format!(" {} <{}> {}", commit.time, commit.author, commit.message));
    line
}

/// Format backend statistics as a short summary block.
pub fn format_stats(stats: &Stats, range: Option<&TimeRange>) -> String {
    let mut out = format!(
        "{} commits by {} authors",
        stats.total_commits, stats.total_authors
    );

    match range {
        Some(range) => out.push_str(&format!(
            "\nspan: {} .. {}",
            range.start.format("%Y-%m-%d %H:%M"),
            range.end.format("%Y-%m-%d %H:%M")
        )),
        None if !stats.date_range.start.is_empty() => out.push_str(&format!(
            "\nspan: {} .. {}",
            stats.date_range.start, stats.date_range.end
        )),
        None => {}
    }

    if !stats.top_authors.is_empty() {
        out.push_str("\ntop authors:\n");
        let lines: Vec<String> = stats
            .top_authors
            .iter()
            .map(|a| format!("{} ({})", a.author, a.commits))
            .collect();
        out.push_str(&format_list(&lines, "  "));
    }
    out
}

/// Format repository identity.
pub fn format_repo_info(info: &RepoInfo) -> String {
    let mut out = format!(
        "Repository: {}\nPath: {}\nBranch: {}\nBranches: {}",
        info.name, info.path, info.current_branch, info.total_branches
    );
    if let Some(remote) = info.remote_url.as_deref().filter(|r| !r.is_empty()) {
        out.push_str(&format!("\nRemote: {}", remote));
    }
    out
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
