//! Memoizing front for the solver.
//!
//! The store is a performance optimization only: lookup and persist failures
//! are logged and the request proceeds with a freshly computed solution.
//! Lookup-then-store is not atomic, so concurrent first requests for the same
//! grid may each compute; the store keeps one of the identical results.

use std::fmt;
use std::sync::Arc;

use super::hash::{canonical_key, compute_run_hash};
use super::store::RunStore;
use crate::solver::{self, Solution};
use crate::{Error, Grid};

/// Turns a grid into its cache key.
pub type Canonicalizer = Arc<dyn Fn(&Grid) -> Result<String, Error> + Send + Sync>;

/// Computes a solution for a grid.
pub type SolveFn = Arc<dyn Fn(&Grid) -> Solution + Send + Sync>;

/// Where a resolved solution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Computed,
}

/// A solution plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub solution: Solution,
    /// Content hash of the canonical key.
    pub hash: String,
    pub source: Source,
}

/// Result cache over a [`RunStore`].
#[derive(Clone)]
pub struct ResultCache<S> {
    store: S,
    canonicalize: Canonicalizer,
    solve: SolveFn,
}

impl<S: fmt::Debug> fmt::Debug for ResultCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCache").field("store", &self.store).finish_non_exhaustive()
    }
}

impl<S: RunStore> ResultCache<S> {
    /// Cache with the default canonical key and solver.
    pub fn new(store: S) -> Self {
        Self { store, canonicalize: Arc::new(canonical_key), solve: Arc::new(solver::solve) }
    }

    /// Replace the canonicalization function.
    pub fn with_canonicalizer<F>(mut self, canonicalize: F) -> Self
    where
        F: Fn(&Grid) -> Result<String, Error> + Send + Sync + 'static,
    {
        self.canonicalize = Arc::new(canonicalize);
        self
    }

    /// Replace the solver.
    pub fn with_solver<F>(mut self, solve: F) -> Self
    where
        F: Fn(&Grid) -> Solution + Send + Sync + 'static,
    {
        self.solve = Arc::new(solve);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the solution for `grid`, computing and storing it on a miss.
    ///
    /// # Errors
    ///
    /// Only `Error::Serialization`, when the grid or solution cannot be
    /// encoded. Storage failures are absorbed.
    pub async fn get_or_compute(&self, grid: &Grid) -> Result<Solution, Error> {
        self.resolve(grid).await.map(|resolved| resolved.solution)
    }

    /// Like [`ResultCache::get_or_compute`], also reporting the run hash and
    /// whether the store answered.
    pub async fn resolve(&self, grid: &Grid) -> Result<Resolved, Error> {
        let key = (self.canonicalize)(grid)?;
        let hash = compute_run_hash(&key);

        if let Some(solution) = self.lookup(&key, &hash).await {
            tracing::debug!(%hash, "cache hit");
            return Ok(Resolved { solution, hash, source: Source::Cache });
        }

        tracing::debug!(%hash, rows = grid.rows(), cols = grid.cols(), "cache miss, solving");
        let solution = (self.solve)(grid);
        let value = serde_json::to_string(&solution)?;

        if let Err(e) = self.store.put(&key, &value).await {
            tracing::warn!(%hash, error = %e, "store unavailable for caching result, returning computed solution");
        }

        Ok(Resolved { solution, hash, source: Source::Computed })
    }

    async fn lookup(&self, key: &str, hash: &str) -> Option<Solution> {
        let stored = match self.store.get(key).await {
            Ok(stored) => stored?,
            Err(e) => {
                tracing::warn!(%hash, error = %e, "store unavailable for cache lookup, proceeding with calculation");
                return None;
            }
        };

        match serde_json::from_str(&stored) {
            Ok(solution) => Some(solution),
            Err(e) => {
                tracing::warn!(%hash, error = %e, "stored run is not a valid solution, recomputing");
                None
            }
        }
    }
}
