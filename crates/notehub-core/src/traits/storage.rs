//! Blob storage trait for pluggable object stores.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for the object store that holds file bytes not inlined in the
/// database.
///
/// Objects are addressed by a flat storage key (a file's unique filename).
/// Implementations live in `notehub-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read an object into memory.
    ///
    /// A missing object is reported as `ErrorKind::NotFound`; connectivity
    /// and I/O problems as `ErrorKind::Storage`.
    async fn read_bytes(&self, key: &str) -> AppResult<Bytes>;

    /// Write an object, replacing any existing one under the same key.
    async fn write(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()>;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// The URL under which other services can reach the object, if any.
    fn public_url(&self, _key: &str) -> Option<String> {
        None
    }
}
