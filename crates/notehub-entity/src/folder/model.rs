//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use notehub_core::types::{FolderId, NotebookId, UserId};

/// A folder in a notebook's folder forest.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root-level folders).
    pub parent_id: Option<FolderId>,
    /// The notebook the folder belongs to.
    pub notebook_id: NotebookId,
    /// The folder owner.
    pub user_id: UserId,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Owning notebook.
    pub notebook_id: NotebookId,
    /// Parent folder (None for root).
    pub parent_id: Option<FolderId>,
    /// Folder name.
    pub name: String,
    /// The folder owner.
    pub user_id: UserId,
}
