//! Folder CRUD within a notebook.

use std::sync::Arc;

use tracing::info;

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::traits::NotebookListing;
use notehub_core::types::{FolderId, NotebookId};
use notehub_database::repositories::FolderRepository;
use notehub_entity::folder::{CreateFolder, Folder};

use crate::context::RequestContext;
use crate::export::FolderIndex;

/// Longest accepted folder name, in characters.
pub const MAX_FOLDER_NAME_LEN: usize = 255;

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>) -> Self {
        Self { folder_repo }
    }

    /// Creates a folder in a notebook, at the root or below `parent_id`.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        notebook_id: &NotebookId,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        let name = validate_folder_name(name)?;

        if let Some(parent_id) = parent_id {
            let parent = self.require_folder(ctx, &parent_id).await?;
            if parent.notebook_id != *notebook_id {
                return Err(AppError::validation(
                    "Parent folder belongs to a different notebook",
                ));
            }
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                notebook_id: *notebook_id,
                parent_id,
                name,
                user_id: ctx.user_id,
            })
            .await?;

        info!(
            request_id = %ctx.request_id,
            folder_id = %folder.id,
            name = %folder.name,
            "Created folder"
        );
        Ok(folder)
    }

    /// Lists every folder of a notebook.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        notebook_id: &NotebookId,
    ) -> AppResult<Vec<Folder>> {
        self.folder_repo
            .list_by_notebook(&ctx.user_id, notebook_id)
            .await
    }

    /// Renames a folder.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: &FolderId,
        new_name: &str,
    ) -> AppResult<Folder> {
        let name = validate_folder_name(new_name)?;
        self.folder_repo
            .rename(&ctx.user_id, folder_id, &name)
            .await
    }

    /// Moves a folder below `new_parent`, or to the notebook root.
    ///
    /// Moves that would make a folder its own ancestor are rejected.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: &FolderId,
        new_parent: Option<FolderId>,
    ) -> AppResult<Folder> {
        let folder = self.require_folder(ctx, folder_id).await?;

        if let Some(parent_id) = new_parent {
            let parent = self.require_folder(ctx, &parent_id).await?;
            if parent.notebook_id != folder.notebook_id {
                return Err(AppError::validation(
                    "Cannot move a folder into a different notebook",
                ));
            }

            let siblings = self
                .folder_repo
                .list_by_notebook(&ctx.user_id, &folder.notebook_id)
                .await?;
            let index = FolderIndex::new(&siblings);
            if index.is_ancestor_or_self(&folder.id, &parent) {
                return Err(AppError::validation(
                    "Cannot move a folder into itself or one of its descendants",
                ));
            }
        }

        self.folder_repo
            .move_folder(&ctx.user_id, folder_id, new_parent)
            .await
    }

    /// Deletes a folder.
    ///
    /// Files inside it move to the notebook root; child folders move up to
    /// the deleted folder's parent. Returns `false` if the folder does not
    /// exist.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: &FolderId) -> AppResult<bool> {
        let Some(release) = self
            .folder_repo
            .delete_releasing_contents(&ctx.user_id, folder_id)
            .await?
        else {
            return Ok(false);
        };

        info!(
            request_id = %ctx.request_id,
            folder_id = %folder_id,
            files_moved = release.files_moved,
            folders_moved = release.folders_moved,
            "Deleted folder"
        );
        Ok(true)
    }

    async fn require_folder(&self, ctx: &RequestContext, folder_id: &FolderId) -> AppResult<Folder> {
        self.folder_repo
            .find_by_id(&ctx.user_id, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }
}

/// Trim and check a folder name. Names may not be empty or contain path
/// separators.
pub fn validate_folder_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    if trimmed.contains(['/', '\\']) {
        return Err(AppError::validation(format!(
            "Folder name '{trimmed}' cannot contain '/' or '\\'"
        )));
    }
    if trimmed.chars().count() > MAX_FOLDER_NAME_LEN {
        return Err(AppError::validation(format!(
            "Folder name exceeds {MAX_FOLDER_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use notehub_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_valid_names_are_trimmed() {
        assert_eq!(validate_folder_name("  Resources ").unwrap(), "Resources");
        assert_eq!(validate_folder_name("Q1: plans?").unwrap(), "Q1: plans?");
    }

    #[test]
    fn test_invalid_names_rejected() {
        for bad in ["", "   ", "a/b", r"a\b"] {
            let err = validate_folder_name(bad).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{bad:?}");
        }
        assert!(validate_folder_name(&"x".repeat(MAX_FOLDER_NAME_LEN + 1)).is_err());
    }
}
