//! Notebook-scoped listing trait for database access.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::{NotebookId, UserId};

/// Lists every entity of one kind that belongs to a notebook.
///
/// Generic over the entity so that files and folders share one seam. The
/// PostgreSQL repositories implement it for production; tests supply
/// in-memory doubles. Ordering of the returned sequence is preserved by
/// consumers.
#[async_trait]
pub trait NotebookListing<Entity>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
{
    /// List the entities owned by `owner` inside `notebook`.
    async fn list_by_notebook(&self, owner: &UserId, notebook: &NotebookId)
    -> AppResult<Vec<Entity>>;
}
