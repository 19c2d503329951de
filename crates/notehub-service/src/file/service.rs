//! File CRUD, upload, and notebook context.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::traits::StorageProvider;
use notehub_core::types::{FileId, FolderId, NotebookId};
use notehub_database::repositories::FileRepository;
use notehub_entity::file::{CreateFile, File, FileChanges, ProcessingResult, ProcessingStatus};
use notehub_storage::guess_content_type;

use super::audio::{AudioTranscoder, FALLBACK_CONTENT_TYPE};
use super::context::build_notebook_context;
use super::naming::generate_unique_filename;
use crate::context::RequestContext;

/// An uploaded file to store.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Target notebook.
    pub notebook_id: Option<NotebookId>,
    /// Target folder (None for the notebook root).
    pub folder_id: Option<FolderId>,
    /// Original filename.
    pub filename: String,
    /// Declared content type; guessed from the extension when absent.
    pub content_type: Option<String>,
    /// File bytes.
    pub data: Bytes,
}

/// Manages file records and their blobs.
#[derive(Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Blob store.
    storage: Arc<dyn StorageProvider>,
    /// Audio normaliser; `None` stores audio as uploaded.
    transcoder: Option<AudioTranscoder>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService")
            .field("storage", &self.storage.provider_type())
            .field("transcoder", &self.transcoder)
            .finish()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        storage: Arc<dyn StorageProvider>,
        transcoder: Option<AudioTranscoder>,
    ) -> Self {
        Self {
            file_repo,
            storage,
            transcoder,
        }
    }

    /// Store an uploaded file and create its record with status `pending`.
    ///
    /// Audio is converted to WAV first when a transcoder is configured.
    pub async fn upload(&self, ctx: &RequestContext, req: UploadRequest) -> AppResult<File> {
        let content_type = req
            .content_type
            .clone()
            .or_else(|| guess_content_type(&req.filename).map(str::to_string))
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        let is_audio = content_type.to_ascii_lowercase().starts_with("audio/");
        let (data, filename, content_type) = match &self.transcoder {
            Some(transcoder) if is_audio => {
                let audio = transcoder
                    .transcode_or_original(req.data, &req.filename)
                    .await;
                (audio.data, audio.filename, audio.content_type)
            }
            _ => (req.data, req.filename, content_type),
        };

        let key = generate_unique_filename(&filename);
        let size = data.len() as i64;
        self.storage
            .write(&key, data, Some(&content_type))
            .await?;

        let file = self
            .create_file_record(CreateFile {
                user_id: ctx.user_id,
                filename,
                url: self.storage.public_url(&key),
                unique_filename: key,
                content_type: Some(content_type),
                file_size_bytes: Some(size),
                notebook_id: req.notebook_id,
                processing_status: ProcessingStatus::Pending,
                content: None,
                folder_id: req.folder_id,
            })
            .await?;

        info!(
            request_id = %ctx.request_id,
            file_id = %file.id,
            filename = %file.filename,
            bytes = size,
            "Uploaded file"
        );
        Ok(file)
    }

    /// Create a file record without touching blob storage.
    pub async fn create_file_record(&self, data: CreateFile) -> AppResult<File> {
        self.file_repo.create(&data).await
    }

    /// List the user's files, optionally within one notebook.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        notebook_id: Option<&NotebookId>,
    ) -> AppResult<Vec<File>> {
        self.file_repo.list_by_user(&ctx.user_id, notebook_id).await
    }

    /// Get one of the user's files.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: &FileId) -> AppResult<File> {
        self.file_repo
            .find_by_id(&ctx.user_id, file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))
    }

    /// Apply `changes` to one of the user's files.
    ///
    /// With `merge_processing_result` the new processing result is merged
    /// key by key into the stored one instead of replacing it. Returns
    /// `None` when the file does not exist or belongs to someone else.
    pub async fn update_file(
        &self,
        ctx: &RequestContext,
        file_id: &FileId,
        mut changes: FileChanges,
        merge_processing_result: bool,
    ) -> AppResult<Option<File>> {
        let Some(existing) = self.file_repo.find_by_id(&ctx.user_id, file_id).await? else {
            return Ok(None);
        };

        if merge_processing_result {
            if let Some(update) = changes.processing_result.take() {
                let merged = existing
                    .processing_result
                    .as_ref()
                    .map(ProcessingResult::from_json_value)
                    .unwrap_or_default()
                    .merge(ProcessingResult::from_json_value(&update));
                changes.processing_result = Some(merged.into_json_value());
            }
        }

        self.file_repo.update(&ctx.user_id, file_id, &changes).await
    }

    /// Delete one of the user's files and its blob.
    ///
    /// Blob deletion is best effort. Returns `false` when the file does not
    /// exist or belongs to someone else.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: &FileId) -> AppResult<bool> {
        let Some(file) = self.file_repo.find_by_id(&ctx.user_id, file_id).await? else {
            return Ok(false);
        };

        if let Some(key) = file.storage_key() {
            if let Err(e) = self.storage.delete(key).await {
                warn!(
                    file_id = %file.id,
                    storage_key = key,
                    error = %e,
                    "Failed to delete blob, removing record anyway"
                );
            }
        }

        self.file_repo.delete(&ctx.user_id, file_id).await
    }

    /// Concatenated text of a notebook's files and audio transcriptions.
    pub async fn notebook_context(
        &self,
        ctx: &RequestContext,
        notebook_id: &NotebookId,
    ) -> AppResult<String> {
        let files = self
            .file_repo
            .list_by_user(&ctx.user_id, Some(notebook_id))
            .await?;
        Ok(build_notebook_context(&files, self.storage.as_ref()).await)
    }
}
