//! Notebook repository implementation.

use std::collections::HashMap;

use sqlx::PgPool;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::types::{FolderId, NotebookId, UserId};
use notehub_entity::file::CreateFile;
use notehub_entity::folder::CreateFolder;
use notehub_entity::notebook::{
    CreateNotebook, Notebook, NotebookSeed, SeedSummary, UpdateNotebook,
};

use super::file::insert_file;
use super::folder::insert_folder;
use super::task::insert_task;

/// Repository for notebook CRUD operations.
#[derive(Debug, Clone)]
pub struct NotebookRepository {
    pool: PgPool,
}

impl NotebookRepository {
    /// Create a new notebook repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a notebook by ID, scoped to its owner.
    pub async fn find_by_id(
        &self,
        owner: &UserId,
        id: &NotebookId,
    ) -> AppResult<Option<Notebook>> {
        sqlx::query_as::<_, Notebook>("SELECT * FROM notebooks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find notebook", e))
    }

    /// List a user's notebooks, newest first.
    pub async fn list_by_user(&self, owner: &UserId) -> AppResult<Vec<Notebook>> {
        sqlx::query_as::<_, Notebook>(
            "SELECT * FROM notebooks WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notebooks", e))
    }

    /// Create a new notebook.
    pub async fn create(&self, data: &CreateNotebook) -> AppResult<Notebook> {
        sqlx::query_as::<_, Notebook>(
            "INSERT INTO notebooks (user_id, emoji, title, date, bg_color, text_color) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.emoji)
        .bind(&data.title)
        .bind(&data.date)
        .bind(&data.bg_color)
        .bind(&data.text_color)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notebook", e))
    }

    /// Apply a partial update. Returns `None` if the notebook does not exist.
    pub async fn update(
        &self,
        owner: &UserId,
        id: &NotebookId,
        data: &UpdateNotebook,
    ) -> AppResult<Option<Notebook>> {
        sqlx::query_as::<_, Notebook>(
            "UPDATE notebooks SET \
             emoji = COALESCE($3, emoji), \
             title = COALESCE($4, title), \
             date = COALESCE($5, date), \
             bg_color = COALESCE($6, bg_color), \
             text_color = COALESCE($7, text_color), \
             updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(&data.emoji)
        .bind(&data.title)
        .bind(&data.date)
        .bind(&data.bg_color)
        .bind(&data.text_color)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update notebook", e))
    }

    /// Delete a notebook. Folders, files, and tasks cascade.
    pub async fn delete(&self, owner: &UserId, id: &NotebookId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notebooks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notebook", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Write a seed's folders, files and tasks into a notebook.
    ///
    /// Everything is inserted in one transaction: if any row fails, or a
    /// file names a folder the seed does not create, nothing is kept.
    pub async fn apply_seed(
        &self,
        owner: &UserId,
        notebook: &NotebookId,
        seed: &NotebookSeed,
    ) -> AppResult<SeedSummary> {
        let db_err =
            |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to seed notebook", e);
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let mut folders: HashMap<&str, FolderId> = HashMap::with_capacity(seed.folders.len());
        for name in &seed.folders {
            let folder = insert_folder(
                &mut *tx,
                &CreateFolder {
                    notebook_id: *notebook,
                    parent_id: None,
                    name: name.clone(),
                    user_id: *owner,
                },
            )
            .await
            .map_err(db_err)?;
            folders.insert(name.as_str(), folder.id);
        }

        for entry in &seed.files {
            let folder_id = match entry.folder.as_deref() {
                Some(name) => Some(*folders.get(name).ok_or_else(|| {
                    AppError::validation(format!(
                        "Seed file '{}' refers to unknown folder '{name}'",
                        entry.file.filename
                    ))
                })?),
                None => None,
            };
            let file = CreateFile {
                user_id: *owner,
                notebook_id: Some(*notebook),
                folder_id,
                ..entry.file.clone()
            };
            insert_file(&mut *tx, &file).await.map_err(db_err)?;
        }

        for task in &seed.tasks {
            insert_task(&mut *tx, owner, notebook, task)
                .await
                .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok(SeedSummary {
            folders: seed.folders.len(),
            files: seed.files.len(),
            tasks: seed.tasks.len(),
        })
    }
}
