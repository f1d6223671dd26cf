//! cache_get tool implementation.
//!
//! Retrieves a memoized run by hash.

use dungeon_core::cache::hash::is_valid_run_hash;
use dungeon_core::{CacheDb, Error, ModelRun};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// The hash returned by dungeon_solve.
    pub hash: String,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    /// The stored run.
    pub run: ModelRun,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(db: Option<&CacheDb>, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let db = db.ok_or(Error::CacheUnavailable)?;

    let hash = params.hash.trim().to_ascii_lowercase();
    if !is_valid_run_hash(&hash) {
        return Err(Error::InvalidHash.into());
    }

    let run = db
        .get_run_by_hash(&hash)
        .await?
        .ok_or_else(|| Error::CacheMiss(hash.clone()))?;

    let output = CacheGetOutput { run };
    let json = serde_json::to_string_pretty(&output).map_err(Error::from)?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::cache::hash::compute_run_hash;

    #[tokio::test]
    async fn test_get_impl_missing() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let params = CacheGetParams { hash: compute_run_hash("[[0]]") };

        let err = get_impl(Some(&db), params).await.unwrap_err();
        assert_eq!(err.code.0, -32001);
    }

    #[tokio::test]
    async fn test_get_impl_invalid_hash() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let params = CacheGetParams { hash: "nonexistent".to_string() };

        let err = get_impl(Some(&db), params).await.unwrap_err();
        assert_eq!(err.message, "Invalid hash format");
    }

    #[tokio::test]
    async fn test_get_impl_without_database() {
        let params = CacheGetParams { hash: compute_run_hash("[[0]]") };
        let err = get_impl(None, params).await.unwrap_err();
        assert_eq!(err.code.0, -32002);
    }

    #[tokio::test]
    async fn test_get_impl_found() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let output = r#"{"minimumHP":1,"path":[[0,0]]}"#;
        db.insert_run("[[0]]", output).await.unwrap();

        let params = CacheGetParams { hash: compute_run_hash("[[0]]").to_uppercase() };
        let result = get_impl(Some(&db), params).await.unwrap();

        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content");
        let parsed: CacheGetOutput = serde_json::from_str(text).unwrap();
        assert_eq!(parsed.run.input, "[[0]]");
        assert_eq!(parsed.run.output, output);
    }
}
