//! Core of the dungeon solver service.
//!
//! This crate provides:
//! - Grid validation and the minimum-HP solver
//! - A memoizing result cache with a SQLite run store
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod grid;
pub mod solver;

pub use cache::{CacheDb, ModelRun, NoopStore, ResultCache, RunStore};
pub use config::AppConfig;
pub use error::Error;
pub use grid::Grid;
pub use solver::{Solution, solve};
