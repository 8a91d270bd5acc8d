//! core::types
//!
//! Data model shared by the backend client and the store.
//!
//! # Design
//!
//! These types mirror the JSON the git-log API produces. Every optional
//! field on the wire is an `Option` here, and aggregate types tolerate
//! missing fields so that older backend versions still decode.

use serde::{Deserialize, Serialize};

/// One historical revision as reported by the backend.
///
/// Rows flagged with `is_graph_only` are synthetic: they exist only so a
/// UI can draw the commit graph and carry no real commit data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commit {
    /// Commit identifier (abbreviated or full hash)
    pub hash: String,
    /// Author display name
    pub author: String,
    /// Author contact address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Commit timestamp, ISO-8601 or space-separated date-time
    pub time: String,
    /// Commit subject/message
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_changed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletions: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Textual graph-drawing annotation (e.g. `"* |"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
    /// Tag/branch references decorating this commit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refs: Option<String>,
    /// Line number in the original log output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u64>,
    /// Original, unparsed log line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_graph_only: Option<bool>,
}

impl Commit {
    /// Whether this row describes an actual commit rather than graph filler.
    pub fn is_real(&self) -> bool {
        !self.is_graph_only.unwrap_or(false)
    }
}

/// First and last date covered by a commit log, as reported by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// An author together with the number of commits attributed to them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthorCount {
    #[serde(alias = "name")]
    pub author: String,
    #[serde(alias = "count")]
    pub commits: u64,
}

/// Backend-computed summary over a commit log.
///
/// The store passes these values through as received. Decoding accepts
/// the backend's `authors: [{name, count}]` shape as well, and fills a
/// missing `total_authors` from the length of that list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "StatsWire")]
pub struct Stats {
    pub total_commits: u64,
    pub total_authors: u64,
    pub date_range: DateRange,
    /// Most active authors, highest commit count first
    pub top_authors: Vec<AuthorCount>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct StatsWire {
    total_commits: u64,
    total_authors: Option<u64>,
    date_range: DateRange,
    #[serde(alias = "authors")]
    top_authors: Vec<AuthorCount>,
}

impl From<StatsWire> for Stats {
    fn from(wire: StatsWire) -> Self {
        let total_authors = wire
            .total_authors
            .unwrap_or(wire.top_authors.len() as u64);
        Stats {
            total_commits: wire.total_commits,
            total_authors,
            date_range: wire.date_range,
            top_authors: wire.top_authors,
        }
    }
}

/// Repository identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoInfo {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub current_branch: String,
    #[serde(default)]
    pub total_branches: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

/// User-chosen repository to inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoConfig {
    /// Filesystem path of the repository on the backend host
    pub path: String,
    /// Maximum number of commits to fetch; zero or negative means unbounded
    pub max_count: i64,
}

impl RepoConfig {
    /// Create a config for `path` with the given commit limit.
    pub fn new(path: impl Into<String>, max_count: i64) -> Self {
        Self {
            path: path.into(),
            max_count,
        }
    }

    /// The commit limit to send to the backend, if any.
    pub fn limit(&self) -> Option<u64> {
        u64::try_from(self.max_count).ok().filter(|n| *n > 0)
    }
}
