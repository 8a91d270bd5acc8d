//! backend
//!
//! Client side of the git-log HTTP API.
//!
//! # Architecture
//!
//! The `Backend` trait is the only way the store talks to the service that
//! does the actual Git work (log parsing, statistics, repository lookup).
//! The store depends on `dyn Backend`, never on a concrete client.
//!
//! # Modules
//!
//! - `traits`: Core `Backend` trait, errors and wire types
//! - [`http`]: reqwest implementation against `http://localhost:5000/api`
//! - [`mock`]: In-memory implementation for deterministic testing

pub mod http;
pub mod mock;
mod traits;

pub use http::{HttpBackend, DEFAULT_API_BASE};
pub use traits::*;
