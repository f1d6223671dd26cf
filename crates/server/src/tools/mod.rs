//! MCP tool implementations.
//!
//! This module contains all tools exposed by the dungeon-mcp server.

pub mod cache;
pub mod dungeon_solve;
