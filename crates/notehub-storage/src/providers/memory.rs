//! In-memory storage provider for tests and ephemeral runs.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::traits::StorageProvider;

/// Blob store held in a process-local map. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorageProvider {
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStorageProvider {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `(key, bytes)` pairs.
    pub fn with_blobs<K, V>(blobs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Bytes>,
    {
        let map = blobs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            blobs: RwLock::new(map),
        }
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        self.blobs
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {key}")))
    }

    async fn write(&self, key: &str, data: Bytes, _content_type: Option<&str>) -> AppResult<()> {
        self.blobs.write().await.insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.blobs.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.blobs.read().await.contains_key(key))
    }
}
