//! Memoized solver runs backed by SQLite.
//!
//! - Canonical JSON keys with SHA-256 content hashes
//! - A `RunStore` seam so the result cache can run against any backend
//! - Automatic schema migrations, WAL mode for concurrent access
//! - Graceful degradation: storage failures never fail a solve

pub mod connection;
pub mod hash;
pub mod memo;
pub mod migrations;
pub mod runs;
pub mod store;

pub use crate::Error;

pub use connection::CacheDb;
pub use memo::{ResultCache, Resolved, Source};
pub use runs::{ModelRun, RunStats};
pub use store::{NoopStore, RunStore};
