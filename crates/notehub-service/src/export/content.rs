//! Byte-content resolution for notebook files.

use std::sync::Arc;

use bytes::Bytes;

use notehub_core::result::AppResult;
use notehub_core::traits::StorageProvider;
use notehub_entity::file::File;

/// Produces the raw bytes of a file from whichever source holds them.
///
/// Order of precedence:
/// 1. non-empty inline text (UTF-8) or inline binary content;
/// 2. the blob stored under the file's storage key;
/// 3. nothing, which yields empty bytes.
#[derive(Debug, Clone)]
pub struct ContentResolver {
    storage: Arc<dyn StorageProvider>,
}

impl ContentResolver {
    /// Creates a resolver backed by the given blob store.
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// Resolve the bytes of `file`. Blob store failures are returned as-is.
    pub async fn resolve(&self, file: &File) -> AppResult<Bytes> {
        if let Some(inline) = inline_content(file) {
            return Ok(inline);
        }

        match file.storage_key() {
            Some(key) => self.storage.read_bytes(key).await,
            None => Ok(Bytes::new()),
        }
    }
}

fn inline_content(file: &File) -> Option<Bytes> {
    if let Some(text) = file.content.as_deref().filter(|text| !text.is_empty()) {
        return Some(Bytes::copy_from_slice(text.as_bytes()));
    }
    file.content_bytes
        .as_deref()
        .filter(|data| !data.is_empty())
        .map(Bytes::copy_from_slice)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use notehub_core::types::{FileId, NotebookId, UserId};
    use notehub_entity::file::ProcessingStatus;
    use notehub_storage::providers::MemoryStorageProvider;

    use super::*;

    fn file(content: Option<&str>, key: Option<&str>) -> File {
        let now = Utc::now();
        File {
            id: FileId::new(),
            user_id: UserId::new(),
            notebook_id: Some(NotebookId::new()),
            folder_id: None,
            filename: "f".to_string(),
            unique_filename: key.map(str::to_string),
            url: None,
            content_type: None,
            content: content.map(str::to_string),
            content_bytes: None,
            processing_status: ProcessingStatus::Completed,
            processing_result: None,
            file_size_bytes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn resolver() -> ContentResolver {
        let storage = MemoryStorageProvider::with_blobs([("blob.png", &b"\x89PNG"[..])]);
        ContentResolver::new(Arc::new(storage))
    }

    #[tokio::test]
    async fn test_inline_text_wins_over_blob() {
        let data = resolver()
            .resolve(&file(Some("# Héllo"), Some("blob.png")))
            .await
            .unwrap();
        assert_eq!(&data[..], "# Héllo".as_bytes());
    }

    #[tokio::test]
    async fn test_inline_binary_is_passed_through() {
        let mut f = file(None, Some("blob.png"));
        f.content_bytes = Some(vec![0, 159, 146, 150]);
        let data = resolver().resolve(&f).await.unwrap();
        assert_eq!(data, Bytes::from_static(&[0, 159, 146, 150]));
    }

    #[tokio::test]
    async fn test_empty_inline_falls_back_to_blob() {
        let data = resolver()
            .resolve(&file(Some(""), Some("blob.png")))
            .await
            .unwrap();
        assert_eq!(&data[..], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_no_source_yields_empty() {
        let data = resolver().resolve(&file(None, None)).await.unwrap();
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn test_missing_blob_is_an_error() {
        let err = resolver()
            .resolve(&file(None, Some("missing.wav")))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
