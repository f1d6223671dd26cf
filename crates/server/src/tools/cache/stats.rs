//! cache_stats tool implementation.

use dungeon_core::{CacheDb, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};

/// Implementation of the cache_stats tool.
pub async fn stats_impl(db: Option<&CacheDb>) -> Result<CallToolResult, McpError> {
    let db = db.ok_or(Error::CacheUnavailable)?;
    let stats = db.run_stats().await?;
    let json = serde_json::to_string_pretty(&stats).map_err(Error::from)?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
