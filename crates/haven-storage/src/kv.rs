//! Key-value contract and the in-memory backend.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Asynchronous key-value store over string keys and JSON string values.
///
/// All Haven persistence goes through this contract, so components never
/// depend on a concrete backend. Implementations must be safe to share
/// behind an `Arc` across tasks.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the record under `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.records
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.records.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_get() {
        let backend = MemoryBackend::new();
        backend.put("k", "v1").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap(), Some("v1".to_string()));

        backend.put("k", "v2").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap(), Some("v2".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let backend = MemoryBackend::new();
        backend.put("k", "v").await.unwrap();
        backend.remove("k").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap(), None);
        backend.remove("k").await.unwrap();
    }
}
