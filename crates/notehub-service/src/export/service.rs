//! Export orchestration.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use notehub_core::config::ExportConfig;
use notehub_core::result::AppResult;
use notehub_core::traits::{NotebookListing, StorageProvider};
use notehub_core::types::NotebookId;
use notehub_entity::file::File;
use notehub_entity::folder::Folder;

use super::archive::{ArchivePlan, archive_root_name};
use super::content::ContentResolver;
use super::error::ExportError;
use super::path::FolderIndex;
use crate::context::RequestContext;

/// A finished notebook export.
#[derive(Debug, Clone)]
pub struct ExportArchive {
    /// Suggested download name, `<root>.zip`.
    pub file_name: String,
    /// Top-level directory inside the archive.
    pub root: String,
    /// ZIP bytes.
    pub data: Bytes,
    /// Entries written, directories included.
    pub entries: usize,
    /// File entries that were skipped.
    pub skipped: usize,
}

/// Builds ZIP archives mirroring a notebook's folder tree.
#[derive(Clone)]
pub struct ExportService {
    /// File listing.
    files: Arc<dyn NotebookListing<File>>,
    /// Folder listing.
    folders: Arc<dyn NotebookListing<Folder>>,
    /// Byte source for each file.
    content: ContentResolver,
    /// DEFLATE level for file entries.
    compression_level: i64,
}

impl std::fmt::Debug for ExportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportService")
            .field("compression_level", &self.compression_level)
            .finish()
    }
}

impl ExportService {
    /// Creates a new export service.
    pub fn new(
        files: Arc<dyn NotebookListing<File>>,
        folders: Arc<dyn NotebookListing<Folder>>,
        storage: Arc<dyn StorageProvider>,
        config: &ExportConfig,
    ) -> Self {
        Self {
            files,
            folders,
            content: ContentResolver::new(storage),
            compression_level: config.compression_level,
        }
    }

    /// Export every file and folder of a notebook as a ZIP archive.
    ///
    /// Only listing failures are returned as errors. Unreadable content is
    /// archived as an empty entry, and entries that cannot be written are
    /// skipped.
    pub async fn export_notebook(
        &self,
        ctx: &RequestContext,
        notebook_id: &NotebookId,
        notebook_name: Option<&str>,
    ) -> AppResult<ExportArchive> {
        let folders = self
            .folders
            .list_by_notebook(&ctx.user_id, notebook_id)
            .await?;
        let files = self
            .files
            .list_by_notebook(&ctx.user_id, notebook_id)
            .await?;

        info!(
            request_id = %ctx.request_id,
            notebook_id = %notebook_id,
            folders = folders.len(),
            files = files.len(),
            "Exporting notebook"
        );

        let index = FolderIndex::new(&folders);
        let mut plan = ArchivePlan::new(archive_root_name(notebook_name));

        for folder in &folders {
            plan.add_directory(&index.resolve_path(folder));
        }

        for file in &files {
            let data = self.file_bytes(file).await;
            let folder_path = file
                .folder_id
                .and_then(|id| index.get(&id))
                .map(|folder| index.resolve_path(folder));
            plan.add_file(folder_path.as_deref(), &file.filename, data);
        }

        let root = plan.root().to_string();
        let level = self.compression_level;
        let output = tokio::task::spawn_blocking(move || plan.write(level))
            .await
            .map_err(ExportError::from)??;

        info!(
            request_id = %ctx.request_id,
            notebook_id = %notebook_id,
            entries = output.entries,
            skipped = output.skipped,
            bytes = output.data.len(),
            "Notebook export complete"
        );

        Ok(ExportArchive {
            file_name: format!("{root}.zip"),
            root,
            data: output.data,
            entries: output.entries,
            skipped: output.skipped,
        })
    }

    async fn file_bytes(&self, file: &File) -> Bytes {
        match self.content.resolve(file).await {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    file_id = %file.id,
                    filename = %file.filename,
                    storage_key = file.storage_key().unwrap_or_default(),
                    error = %e,
                    "Could not fetch file content, archiving empty entry"
                );
                Bytes::new()
            }
        }
    }
}
