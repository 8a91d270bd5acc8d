//! core::timestamp
//!
//! Timestamp handling for commit `time` strings.
//!
//! # Accepted formats
//!
//! Parsing is strict and locale-independent. A timestamp is accepted if it
//! matches one of, tried in order:
//!
//! 1. RFC 3339 (`2024-03-01T10:15:00Z`, `2024-03-01T10:15:00+08:00`)
//! 2. Git ISO format with offset (`2024-03-01 10:15:00 +0800`)
//! 3. Naive date-time with `T` or space separator, fractional seconds
//!    allowed (`2024-03-01T10:15:00`, `2024-03-01 10:15:00.123`)
//! 4. Bare date (`2024-03-01`), read as midnight
//!
//! Naive values carry no zone and are read as UTC. Anything else yields
//! `None`; callers skip such values rather than guessing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%dT%H:%M:%S %z"];

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a commit timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Extract the grouping key (date portion) of a commit timestamp.
///
/// Returns the text before the first `'T'` if there is one, otherwise the
/// text before the first space, otherwise the whole string.
pub fn date_key(time: &str) -> &str {
    if let Some((date, _)) = time.split_once('T') {
        return date;
    }
    match time.split_once(' ') {
        Some((date, _)) => date,
        None => time,
    }
}
