//! Run cache inspection tools.

pub mod get;
pub mod stats;

pub use get::{CacheGetParams, get_impl};
pub use stats::stats_impl;
