//! Unified error types for the dungeon solver.
//!
//! Storage variants never escape the result cache; they only reach callers
//! through the cache inspection tools.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the dungeon solver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structurally invalid dungeon grid (empty, empty rows, jagged, too large).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// A grid or solution could not be encoded or decoded.
    #[error("SERIALIZATION_ERROR: {0}")]
    Serialization(String),

    /// No stored run for the given hash.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// The server is running without a run database.
    #[error("CACHE_UNAVAILABLE")]
    CacheUnavailable,

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Invalid hash format.
    #[error("CACHE_ERROR: invalid hash format")]
    InvalidHash,

    /// Storage failure reported by the connection layer without a SQLite cause.
    #[error("CACHE_ERROR: {0}")]
    Storage(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            other => Error::Storage(other.to_string()),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::Serialization(msg) => (-32603, msg.clone()),
            Error::CacheMiss(msg) => (-32001, msg.clone()),
            Error::CacheUnavailable => (-32002, "Run cache is not available".to_string()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
            Error::InvalidHash => (-32002, "Invalid hash format".to_string()),
            Error::Storage(msg) => (-32002, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CacheMiss("abc123".to_string());
        assert!(err.to_string().contains("CACHE_MISS"));
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn test_invalid_input_maps_to_invalid_params() {
        let err = Error::InvalidInput("All rows in dungeon must have the same length".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
        assert_eq!(mcp_err.message, "All rows in dungeon must have the same length");
    }

    #[test]
    fn test_serialization_is_internal_error() {
        let err = Error::Serialization("bad json".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32603);
    }

    #[test]
    fn test_connection_error_keeps_inner_cause() {
        let wrapped: tokio_rusqlite::Error<Error> = tokio_rusqlite::Error::Error(Error::InvalidHash);
        assert!(matches!(Error::from(wrapped), Error::InvalidHash));

        let closed: tokio_rusqlite::Error<Error> = tokio_rusqlite::Error::ConnectionClosed;
        assert!(matches!(Error::from(closed), Error::Database(tokio_rusqlite::Error::ConnectionClosed)));
    }

    #[test]
    fn test_storage_error_keeps_message() {
        let err = Error::Storage("connection worker panicked".to_string());
        assert_eq!(err.to_string(), "CACHE_ERROR: connection worker panicked");

        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32002);
        assert_eq!(mcp_err.message, "connection worker panicked");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<i32>>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
