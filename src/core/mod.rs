//! core
//!
//! Data model, timestamp rules, and configuration for gitscope.
//!
//! # Modules
//!
//! - [`types`] - Commit, Stats, RepoInfo, RepoConfig
//! - [`timestamp`] - Strict timestamp parsing and date-key extraction
//! - [`config`] - Client configuration schema and loading

pub mod config;
pub mod timestamp;
pub mod types;
