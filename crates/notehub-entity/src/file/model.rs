//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use notehub_core::types::{FileId, FolderId, NotebookId, UserId};

/// A file inside a notebook.
///
/// Bytes live either inline on the record (`content` for text,
/// `content_bytes` for binary) or in blob storage under `unique_filename`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The owning user.
    pub user_id: UserId,
    /// The notebook the file belongs to.
    pub notebook_id: Option<NotebookId>,
    /// The folder containing this file (null for the notebook root).
    pub folder_id: Option<FolderId>,
    /// Display file name (including extension).
    pub filename: String,
    /// Storage key addressing the blob store.
    pub unique_filename: Option<String>,
    /// URL of the blob, as reachable by other services.
    pub url: Option<String>,
    /// MIME type of the file.
    pub content_type: Option<String>,
    /// Inline textual content.
    pub content: Option<String>,
    /// Inline binary content.
    #[serde(skip_serializing)]
    pub content_bytes: Option<Vec<u8>>,
    /// Processing pipeline state.
    pub processing_status: ProcessingStatus,
    /// Structured processing output (e.g. `{"transcription": "..."}`).
    pub processing_result: Option<serde_json::Value>,
    /// File size in bytes.
    pub file_size_bytes: Option<i64>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// The blob storage key, if the record has a non-empty one.
    pub fn storage_key(&self) -> Option<&str> {
        self.unique_filename
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// Whether the content type is `audio/*`.
    pub fn is_audio(&self) -> bool {
        self.has_content_type_prefix("audio/")
    }

    /// Whether the content type is `text/*`.
    pub fn is_text(&self) -> bool {
        self.has_content_type_prefix("text/")
    }

    /// The transcription stored in the processing result, if any.
    pub fn transcription(&self) -> Option<&str> {
        self.processing_result
            .as_ref()
            .and_then(|value| value.get("transcription"))
            .and_then(|value| value.as_str())
            .filter(|text| !text.is_empty())
    }

    fn has_content_type_prefix(&self, prefix: &str) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with(prefix))
    }
}

/// Processing state of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "processing_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    /// Waiting for the processing pipeline.
    #[default]
    Pending,
    /// Being processed (e.g. transcription running).
    Processing,
    /// Processing finished and the result is stored.
    Completed,
    /// Processing failed.
    Failed,
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFile {
    /// The owning user.
    pub user_id: UserId,
    /// Display file name.
    pub filename: String,
    /// Storage key.
    pub unique_filename: String,
    /// Blob URL.
    pub url: Option<String>,
    /// MIME type.
    pub content_type: Option<String>,
    /// File size in bytes.
    pub file_size_bytes: Option<i64>,
    /// Owning notebook.
    pub notebook_id: Option<NotebookId>,
    /// Initial processing status.
    pub processing_status: ProcessingStatus,
    /// Inline textual content.
    pub content: Option<String>,
    /// Containing folder (None for the notebook root).
    pub folder_id: Option<FolderId>,
}

/// Partial update of a file record. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileChanges {
    /// New display name.
    pub filename: Option<String>,
    /// New inline text content.
    pub content: Option<String>,
    /// New processing status.
    pub processing_status: Option<ProcessingStatus>,
    /// New processing result (replaced or merged, see the file service).
    pub processing_result: Option<serde_json::Value>,
    /// Move to another folder; `Some(None)` moves to the notebook root.
    pub folder_id: Option<Option<FolderId>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: Option<&str>) -> File {
        let now = Utc::now();
        File {
            id: FileId::new(),
            user_id: UserId::new(),
            notebook_id: Some(NotebookId::new()),
            folder_id: None,
            filename: name.to_string(),
            unique_filename: None,
            url: None,
            content_type: content_type.map(str::to_string),
            content: None,
            content_bytes: None,
            processing_status: ProcessingStatus::Pending,
            processing_result: None,
            file_size_bytes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_blank_storage_key_is_absent() {
        let mut f = file("a.md", None);
        f.unique_filename = Some("  ".to_string());
        assert_eq!(f.storage_key(), None);
        f.unique_filename = Some("1700000000_abc.md".to_string());
        assert_eq!(f.storage_key(), Some("1700000000_abc.md"));
    }

    #[test]
    fn test_content_type_classification() {
        assert!(file("clip.wav", Some("Audio/WAV")).is_audio());
        assert!(file("notes.md", Some("text/markdown")).is_text());
        assert!(!file("blob", None).is_text());
    }

    #[test]
    fn test_transcription_lookup() {
        let mut f = file("clip.wav", Some("audio/wav"));
        assert_eq!(f.transcription(), None);
        f.processing_result = Some(serde_json::json!({"transcription": "hello there"}));
        assert_eq!(f.transcription(), Some("hello there"));
        f.processing_result = Some(serde_json::json!({"transcription": 5}));
        assert_eq!(f.transcription(), None);
    }
}
