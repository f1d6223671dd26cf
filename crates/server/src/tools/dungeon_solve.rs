//! dungeon_solve tool implementation.
//!
//! Validates the grid, then answers from the run cache or the solver.

use dungeon_core::cache::{ResultCache, RunStore, Source};
use dungeon_core::{Error, Grid, Solution};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for dungeon_solve tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DungeonSolveParams {
    /// Dungeon grid, one array per row. Negative cells damage, positive
    /// cells heal. Rows must be non-empty and of equal length.
    pub dungeon: Vec<Vec<i32>>,
}

/// Output structure for dungeon_solve tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DungeonSolveOutput {
    /// `minimumHP` and `path`.
    #[serde(flatten)]
    pub solution: Solution,
    /// Run hash for cache_get.
    pub hash: String,
    /// Whether the answer came from the run cache.
    pub cached: bool,
}

/// Implementation of the dungeon_solve tool.
pub async fn solve_impl<S: RunStore>(
    cache: &ResultCache<S>, max_cells: usize, params: DungeonSolveParams,
) -> Result<CallToolResult, McpError> {
    let grid = Grid::with_limit(params.dungeon, max_cells)?;
    let resolved = cache.resolve(&grid).await?;

    let output = DungeonSolveOutput {
        solution: resolved.solution,
        hash: resolved.hash,
        cached: resolved.source == Source::Cache,
    };
    let json = serde_json::to_string_pretty(&output).map_err(Error::from)?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
