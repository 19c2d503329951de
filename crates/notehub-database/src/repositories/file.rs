//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgExecutor;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::traits::NotebookListing;
use notehub_core::types::{FileId, NotebookId, UserId};
use notehub_entity::file::{CreateFile, File, FileChanges};

/// Repository for file CRUD and query operations.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a file by ID, scoped to its owner.
    pub async fn find_by_id(&self, owner: &UserId, id: &FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List a user's files, optionally restricted to one notebook.
    pub async fn list_by_user(
        &self,
        owner: &UserId,
        notebook: Option<&NotebookId>,
    ) -> AppResult<Vec<File>> {
        let query = match notebook {
            Some(notebook) => sqlx::query_as::<_, File>(
                "SELECT * FROM files WHERE user_id = $1 AND notebook_id = $2 \
                 ORDER BY created_at ASC",
            )
            .bind(owner)
            .bind(notebook),
            None => sqlx::query_as::<_, File>(
                "SELECT * FROM files WHERE user_id = $1 ORDER BY created_at ASC",
            )
            .bind(owner),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Insert a new file record.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        insert_file(&self.pool, data)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    /// Apply a partial update. Returns `None` if the file does not exist.
    pub async fn update(
        &self,
        owner: &UserId,
        id: &FileId,
        changes: &FileChanges,
    ) -> AppResult<Option<File>> {
        let (move_folder, folder_id) = match changes.folder_id {
            Some(target) => (true, target),
            None => (false, None),
        };

        sqlx::query_as::<_, File>(
            "UPDATE files SET \
             filename = COALESCE($3, filename), \
             content = COALESCE($4, content), \
             processing_status = COALESCE($5, processing_status), \
             processing_result = COALESCE($6, processing_result), \
             folder_id = CASE WHEN $7 THEN $8 ELSE folder_id END, \
             updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(&changes.filename)
        .bind(&changes.content)
        .bind(changes.processing_status)
        .bind(&changes.processing_result)
        .bind(move_folder)
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file", e))
    }

    /// Delete a file record.
    pub async fn delete(&self, owner: &UserId, id: &FileId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Insert a file record on any executor, so seeding can share a transaction.
pub(crate) async fn insert_file<'e, E>(executor: E, data: &CreateFile) -> sqlx::Result<File>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, File>(
        "INSERT INTO files (user_id, notebook_id, folder_id, filename, unique_filename, url, \
         content_type, content, processing_status, file_size_bytes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
    )
    .bind(data.user_id)
    .bind(data.notebook_id)
    .bind(data.folder_id)
    .bind(&data.filename)
    .bind(&data.unique_filename)
    .bind(&data.url)
    .bind(&data.content_type)
    .bind(&data.content)
    .bind(data.processing_status)
    .bind(data.file_size_bytes)
    .fetch_one(executor)
    .await
}

#[async_trait]
impl NotebookListing<File> for FileRepository {
    async fn list_by_notebook(
        &self,
        owner: &UserId,
        notebook: &NotebookId,
    ) -> AppResult<Vec<File>> {
        self.list_by_user(owner, Some(notebook)).await
    }
}
