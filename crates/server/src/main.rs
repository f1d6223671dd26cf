//! dungeon-mcp server entry point.
//!
//! Boots the MCP server on stdio transport. Logging goes to stderr so it does
//! not interfere with the JSON-RPC protocol on stdout.

use anyhow::Result;
use dungeon_core::{AppConfig, CacheDb};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    let db = if config.cache_enabled {
        match CacheDb::open(&config.db_path).await {
            Ok(db) => Some(db),
            Err(e) => {
                tracing::warn!(
                    db_path = %config.db_path.display(),
                    error = %e,
                    "run database unavailable, solving without memoization"
                );
                None
            }
        }
    } else {
        None
    };

    tracing::info!(
        cache = db.is_some(),
        max_cells = config.max_cells,
        "Starting dungeon-mcp server on stdio transport"
    );

    let handler = handler::DungeonServer::new(db, config.max_cells);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
