//! Key/value contract between the result cache and its backing store.

use std::sync::Arc;

use crate::Error;

/// Storage backend for memoized runs.
///
/// `key` is a canonical grid encoding and `value` a serialized solution.
/// Implementations must treat the key as unique and accept a duplicate
/// `put` for an existing key as a no-op.
#[async_trait::async_trait]
pub trait RunStore: Send + Sync {
    /// Look up a stored value. `Ok(None)` means the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store a value for a key that may already exist.
    async fn put(&self, key: &str, value: &str) -> Result<(), Error>;
}

#[async_trait::async_trait]
impl<T: RunStore + ?Sized> RunStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), Error> {
        (**self).put(key, value).await
    }
}

/// Store that never remembers anything.
///
/// Used when caching is disabled or the database could not be opened.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

#[async_trait::async_trait]
impl RunStore for NoopStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, Error> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_store_forgets() {
        let store = NoopStore;
        store.put("[[0]]", "{}").await.unwrap();
        assert!(store.get("[[0]]").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_arc_dyn_store_delegates() {
        let store: Arc<dyn RunStore> = Arc::new(NoopStore);
        assert!(store.get("[[0]]").await.unwrap().is_none());
    }
}
