//! MCP server handler implementation.
//!
//! Routes tool calls to the dungeon solver and the run cache tools.
use std::sync::Arc;

use crate::tools::cache::{CacheGetParams, get_impl, stats_impl};
use crate::tools::dungeon_solve::{DungeonSolveParams, solve_impl};
use dungeon_core::{CacheDb, NoopStore, ResultCache, RunStore};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// Result cache shared by every request, over whichever store is configured.
pub type SharedCache = Arc<ResultCache<Arc<dyn RunStore>>>;

/// The main MCP server handler for dungeon-mcp.
#[derive(Clone)]
pub struct DungeonServer {
    tool_router: ToolRouter<Self>,
    cache: SharedCache,
    db: Option<CacheDb>,
    max_cells: usize,
}

#[tool_router]
impl DungeonServer {
    /// Create a new server handler.
    ///
    /// Without a database every solve is computed fresh and the cache tools
    /// report the cache as unavailable.
    pub fn new(db: Option<CacheDb>, max_cells: usize) -> Self {
        let store: Arc<dyn RunStore> = match &db {
            Some(db) => Arc::new(db.clone()),
            None => Arc::new(NoopStore),
        };

        Self { tool_router: Self::tool_router(), cache: Arc::new(ResultCache::new(store)), db, max_cells }
    }

    /// Solve a dungeon grid.
    #[tool(
        description = "Compute the minimum initial HP needed to cross a dungeon grid from top-left to bottom-right, moving only right or down, and the path that achieves it. Results are memoized per grid."
    )]
    async fn dungeon_solve(&self, params: Parameters<DungeonSolveParams>) -> Result<CallToolResult, McpError> {
        solve_impl(&self.cache, self.max_cells, params.0).await
    }

    /// Fetch a stored run by hash.
    #[tool(description = "Retrieve a memoized dungeon run (input grid and stored solution) by the hash returned from dungeon_solve.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(self.db.as_ref(), params.0).await
    }

    /// Report run cache size.
    #[tool(description = "Report how many dungeon runs are memoized and when the oldest and newest were stored.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(self.db.as_ref()).await
    }
}

impl ServerHandler for DungeonServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "dungeon-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
