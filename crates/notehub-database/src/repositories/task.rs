//! Task repository implementation.

use sqlx::PgPool;
use sqlx::postgres::PgExecutor;

use notehub_core::error::{AppError, ErrorKind};
use notehub_core::result::AppResult;
use notehub_core::types::{NotebookId, UserId};
use notehub_entity::task::{CreateTask, Task};

/// Repository for Kanban tasks.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Create a new task repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a notebook's tasks ordered by column and position.
    pub async fn list_by_notebook(
        &self,
        owner: &UserId,
        notebook: &NotebookId,
    ) -> AppResult<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE user_id = $1 AND notebook_id = $2 \
             ORDER BY status ASC, position ASC",
        )
        .bind(owner)
        .bind(notebook)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))
    }
}

/// Insert one task on any executor, so seeding can share a transaction.
pub(crate) async fn insert_task<'e, E>(
    executor: E,
    owner: &UserId,
    notebook: &NotebookId,
    task: &CreateTask,
) -> sqlx::Result<Task>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (notebook_id, user_id, title, description, status, priority, \
         due_date, tags, position) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(notebook)
    .bind(owner)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.status)
    .bind(task.priority)
    .bind(task.due_date)
    .bind(&task.tags)
    .bind(task.position)
    .fetch_one(executor)
    .await
}
