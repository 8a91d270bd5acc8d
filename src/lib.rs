//! gitscope - Client-side store for repository history served over HTTP
//!
//! gitscope fetches a repository's commit log, aggregate statistics and
//! identity from a git-log API and keeps them in memory for a presentation
//! layer. All Git work (log parsing, statistics) happens in the backend
//! service; this crate is the typed client and cache in front of it.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, drives the store)
//! - [`store`] - State container, derived views, fetch actions
//! - [`backend`] - Abstraction over the git-log API (HTTP and mock)
//! - [`core`] - Data model, timestamp rules, configuration
//! - [`ui`] - Terminal output formatting
//!
//! # Invariants
//!
//! 1. Held commits are exactly the rows of the last successful log fetch
//! 2. `loading` is never left set after a log fetch returns
//! 3. Repository info and health failures never surface as store errors
//! 4. Clearing data never clears the repository config

pub mod backend;
pub mod cli;
pub mod core;
pub mod store;
pub mod ui;
