//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgExecutor;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::traits::NotebookListing;
use notehub_core::types::{FolderId, NotebookId, UserId};
use notehub_entity::folder::{CreateFolder, Folder};

/// Repository for folder CRUD queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID, scoped to its owner.
    pub async fn find_by_id(&self, owner: &UserId, id: &FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        insert_folder(&self.pool, data)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    /// Rename a folder.
    pub async fn rename(&self, owner: &UserId, id: &FolderId, new_name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Re-parent a folder. `None` moves it to the notebook root.
    pub async fn move_folder(
        &self,
        owner: &UserId,
        id: &FolderId,
        new_parent: Option<FolderId>,
    ) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(new_parent)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Delete a folder, moving its files to the notebook root and its
    /// direct children to its parent. Returns `None` if the folder does not
    /// exist for this owner; nothing is changed in that case.
    ///
    /// All three statements share one transaction.
    pub async fn delete_releasing_contents(
        &self,
        owner: &UserId,
        id: &FolderId,
    ) -> AppResult<Option<FolderRelease>> {
        let db_err = |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e);
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let parent = sqlx::query_scalar::<_, Option<FolderId>>(
            "SELECT parent_id FROM folders WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        let Some(parent) = parent else {
            return Ok(None);
        };

        let files_moved = sqlx::query(
            "UPDATE files SET folder_id = NULL, updated_at = NOW() \
             WHERE folder_id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?
        .rows_affected();

        let folders_moved = sqlx::query(
            "UPDATE folders SET parent_id = $3, updated_at = NOW() \
             WHERE parent_id = $1 AND user_id = $2 AND id <> $1",
        )
        .bind(id)
        .bind(owner)
        .bind(parent.filter(|p| p != id))
        .execute(&mut *tx)
        .await
        .map_err(db_err)?
        .rows_affected();

        sqlx::query("DELETE FROM folders WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(Some(FolderRelease {
            files_moved,
            folders_moved,
        }))
    }
}

/// What a folder delete moved out of the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderRelease {
    /// Files moved to the notebook root.
    pub files_moved: u64,
    /// Child folders moved to the deleted folder's parent.
    pub folders_moved: u64,
}

/// Insert a folder on any executor, so seeding can share a transaction.
pub(crate) async fn insert_folder<'e, E>(executor: E, data: &CreateFolder) -> sqlx::Result<Folder>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Folder>(
        "INSERT INTO folders (notebook_id, parent_id, name, user_id) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(data.notebook_id)
    .bind(data.parent_id)
    .bind(&data.name)
    .bind(data.user_id)
    .fetch_one(executor)
    .await
}

#[async_trait]
impl NotebookListing<Folder> for FolderRepository {
    async fn list_by_notebook(
        &self,
        owner: &UserId,
        notebook: &NotebookId,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE user_id = $1 AND notebook_id = $2 \
             ORDER BY created_at ASC",
        )
        .bind(owner)
        .bind(notebook)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }
}
