//! Task entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use notehub_core::types::{NotebookId, TaskId, UserId};

use super::status::{TaskPriority, TaskStatus};

/// A Kanban task attached to a notebook.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// The notebook the task belongs to.
    pub notebook_id: NotebookId,
    /// The owning user.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Kanban column.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Position within the column (0-based).
    pub position: i32,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTask {
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Kanban column.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Tags.
    pub tags: Vec<String>,
    /// Position within the column.
    pub position: i32,
}
