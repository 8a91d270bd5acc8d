//! ui
//!
//! Terminal presentation for the CLI.

pub mod output;
