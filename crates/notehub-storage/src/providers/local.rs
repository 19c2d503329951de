//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::traits::StorageProvider;

/// Local filesystem storage provider. Each storage key maps to a file
/// below the root directory.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored blobs.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a storage key to a path within the root.
    ///
    /// Keys that would escape the root are rejected.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let clean = key.trim_start_matches('/');
        let relative = Path::new(clean);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if clean.is_empty() || escapes {
            return Err(AppError::validation(format!("Invalid storage key: {key}")));
        }
        Ok(self.root.join(relative))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(key)?;
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {key}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to read blob: {key}"), e)
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write blob: {key}"), e)
        })?;

        debug!(key, bytes = data.len(), content_type, "Wrote blob");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_path = self.resolve(key)?;
        fs::try_exists(&full_path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to stat blob: {key}"), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn provider(dir: &tempfile::TempDir) -> LocalStorageProvider {
        LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_write_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;

        let data = Bytes::from("hello world");
        provider
            .write("1700000000_abc.md", data.clone(), Some("text/markdown"))
            .await
            .unwrap();
        assert!(provider.exists("1700000000_abc.md").await.unwrap());

        let read_back = provider.read_bytes("1700000000_abc.md").await.unwrap();
        assert_eq!(read_back, data);

        provider.delete("1700000000_abc.md").await.unwrap();
        assert!(!provider.exists("1700000000_abc.md").await.unwrap());
        provider.delete("1700000000_abc.md").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_blob_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;

        let err = provider.read_bytes("missing.wav").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider(&dir).await;

        let err = provider.read_bytes("../etc/passwd").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(provider.exists("").await.is_err());
    }
}
