//! Plain-text context assembled from a notebook's files.

use tracing::warn;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::traits::StorageProvider;
use notehub_entity::file::File;

/// Concatenate the readable content of `files`.
///
/// Text files contribute their inline content, or their blob decoded as
/// UTF-8. Audio files contribute their stored transcription. Sections are
/// separated by a blank line. Files that cannot be read are skipped.
pub async fn build_notebook_context(files: &[File], storage: &dyn StorageProvider) -> String {
    let mut parts = Vec::new();

    for file in files {
        if file.is_text() {
            match text_content(file, storage).await {
                Ok(Some(text)) => parts.push(format!("--- File: {} ---\n{text}", file.filename)),
                Ok(None) => {}
                Err(e) => warn!(
                    file_id = %file.id,
                    filename = %file.filename,
                    error = %e,
                    "Skipping file in notebook context"
                ),
            }
        } else if file.is_audio() {
            if let Some(transcription) = file.transcription() {
                parts.push(format!(
                    "--- File: {} (Transcription) ---\n{transcription}",
                    file.filename
                ));
            }
        }
    }

    parts.join("\n\n")
}

async fn text_content(file: &File, storage: &dyn StorageProvider) -> AppResult<Option<String>> {
    if let Some(text) = file.content.as_deref().filter(|text| !text.is_empty()) {
        return Ok(Some(text.to_string()));
    }
    let Some(key) = file.storage_key() else {
        return Ok(None);
    };

    let data = storage.read_bytes(key).await?;
    let text = String::from_utf8(data.to_vec())
        .map_err(|e| AppError::validation(format!("Blob {key} is not UTF-8: {e}")))?;
    Ok(Some(text).filter(|text| !text.is_empty()))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use notehub_core::types::{FileId, NotebookId, UserId};
    use notehub_entity::file::ProcessingStatus;
    use notehub_storage::providers::MemoryStorageProvider;

    use super::*;

    fn file(name: &str, content_type: &str) -> File {
        let now = Utc::now();
        File {
            id: FileId::new(),
            user_id: UserId::new(),
            notebook_id: Some(NotebookId::new()),
            folder_id: None,
            filename: name.to_string(),
            unique_filename: None,
            url: None,
            content_type: Some(content_type.to_string()),
            content: None,
            content_bytes: None,
            processing_status: ProcessingStatus::Completed,
            processing_result: None,
            file_size_bytes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_context_joins_text_and_transcriptions() {
        let storage = MemoryStorageProvider::with_blobs([
            ("k1.txt", &b"from blob"[..]),
            ("bad.txt", &b"\xff\xfe"[..]),
        ]);

        let mut inline = file("tasks.md", "text/markdown");
        inline.content = Some("# Tasks".to_string());

        let mut stored = file("notes.txt", "text/plain");
        stored.unique_filename = Some("k1.txt".to_string());

        let mut broken = file("broken.txt", "text/plain");
        broken.unique_filename = Some("bad.txt".to_string());

        let mut missing = file("gone.txt", "text/plain");
        missing.unique_filename = Some("gone.txt".to_string());

        let mut audio = file("memo.wav", "audio/wav");
        audio.processing_result = Some(json!({"transcription": "hello"}));

        let untranscribed = file("raw.wav", "audio/wav");
        let image = file("pic.png", "image/png");

        let files = vec![inline, stored, broken, missing, audio, untranscribed, image];
        let context = build_notebook_context(&files, &storage).await;

        assert_eq!(
            context,
            "--- File: tasks.md ---\n# Tasks\n\n\
             --- File: notes.txt ---\nfrom blob\n\n\
             --- File: memo.wav (Transcription) ---\nhello"
        );
    }

    #[tokio::test]
    async fn test_empty_notebook_context() {
        let storage = MemoryStorageProvider::new();
        assert_eq!(build_notebook_context(&[], &storage).await, "");
    }
}
