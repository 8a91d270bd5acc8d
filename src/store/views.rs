//! store::views
//!
//! Read-only views derived from a commit sequence.
//!
//! All functions here are pure: they are recomputed from the current
//! commits on every call, so they can never disagree with the last
//! completed fetch. Graph-only rows are skipped by every view except
//! [`has_data`].

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use crate::core::timestamp::{date_key, parse_timestamp};
use crate::core::types::Commit;

/// Earliest and latest commit timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Whether any rows have been fetched.
pub fn has_data(commits: &[Commit]) -> bool {
    !commits.is_empty()
}

/// Distinct author names in order of first appearance.
pub fn author_list(commits: &[Commit]) -> Vec<String> {
    let mut seen = HashSet::new();
    commits
        .iter()
        .filter(|c| c.is_real())
        .filter(|c| seen.insert(c.author.as_str()))
        .map(|c| c.author.clone())
        .collect()
}

/// Commits grouped by the date portion of their timestamp.
///
/// Keys are ordered; commits inside a group keep their log order.
pub fn commits_by_date(commits: &[Commit]) -> BTreeMap<String, Vec<Commit>> {
    let mut grouped: BTreeMap<String, Vec<Commit>> = BTreeMap::new();
    for commit in commits.iter().filter(|c| c.is_real()) {
        grouped
            .entry(date_key(&commit.time).to_string())
            .or_default()
            .push(commit.clone());
    }
    grouped
}

/// Span between the earliest and latest parseable commit timestamps.
///
/// Graph-only rows and timestamps that do not parse are ignored. The result
/// is `None` for an empty log and for a non-empty log in which no real
/// commit has a parseable timestamp.
pub fn time_range(commits: &[Commit]) -> Option<TimeRange> {
    commits
        .iter()
        .filter(|c| c.is_real())
        .filter_map(|c| parse_timestamp(&c.time))
        .fold(None, |range, t| match range {
            None => Some(TimeRange { start: t, end: t }),
            Some(TimeRange { start, end }) => Some(TimeRange {
                start: start.min(t),
                end: end.max(t),
            }),
        })
}
