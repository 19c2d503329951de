//! Notebook lifecycle and export.

use std::sync::Arc;

use tracing::{error, info};

use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::types::NotebookId;
use notehub_database::repositories::NotebookRepository;
use notehub_entity::notebook::{CreateNotebook, Notebook, UpdateNotebook};

use super::template::TemplateService;
use crate::context::RequestContext;
use crate::export::{ExportArchive, ExportService};

/// Manages notebooks.
#[derive(Debug, Clone)]
pub struct NotebookService {
    /// Notebook repository.
    notebook_repo: Arc<NotebookRepository>,
    /// Starter content; `None` creates empty notebooks.
    templates: Option<Arc<TemplateService>>,
    /// ZIP export.
    export: Arc<ExportService>,
}

impl NotebookService {
    /// Creates a new notebook service.
    pub fn new(
        notebook_repo: Arc<NotebookRepository>,
        templates: Option<Arc<TemplateService>>,
        export: Arc<ExportService>,
    ) -> Self {
        Self {
            notebook_repo,
            templates,
            export,
        }
    }

    /// Creates a notebook and applies the starter template.
    ///
    /// A template failure is logged and does not fail the creation.
    pub async fn create_notebook(
        &self,
        ctx: &RequestContext,
        mut data: CreateNotebook,
    ) -> AppResult<Notebook> {
        data.user_id = ctx.user_id;
        if data.title.trim().is_empty() {
            return Err(AppError::validation("Notebook title cannot be empty"));
        }

        let notebook = self.notebook_repo.create(&data).await?;
        info!(
            request_id = %ctx.request_id,
            notebook_id = %notebook.id,
            title = %notebook.title,
            "Created notebook"
        );

        if let Some(templates) = &self.templates {
            if let Err(e) = templates
                .apply_content_creation_template(ctx, &notebook.id)
                .await
            {
                error!(
                    request_id = %ctx.request_id,
                    notebook_id = %notebook.id,
                    error = %e,
                    "Template application failed"
                );
            }
        }

        Ok(notebook)
    }

    /// Gets one of the user's notebooks.
    pub async fn get_notebook(
        &self,
        ctx: &RequestContext,
        notebook_id: &NotebookId,
    ) -> AppResult<Notebook> {
        self.notebook_repo
            .find_by_id(&ctx.user_id, notebook_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notebook {notebook_id} not found")))
    }

    /// Lists the user's notebooks, newest first.
    pub async fn list_notebooks_for_user(&self, ctx: &RequestContext) -> AppResult<Vec<Notebook>> {
        self.notebook_repo.list_by_user(&ctx.user_id).await
    }

    /// Applies a partial update. Returns `None` if the notebook does not exist.
    pub async fn update_notebook(
        &self,
        ctx: &RequestContext,
        notebook_id: &NotebookId,
        update: UpdateNotebook,
    ) -> AppResult<Option<Notebook>> {
        if update.is_empty() {
            return self
                .notebook_repo
                .find_by_id(&ctx.user_id, notebook_id)
                .await;
        }
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("Notebook title cannot be empty"));
        }
        self.notebook_repo
            .update(&ctx.user_id, notebook_id, &update)
            .await
    }

    /// Deletes a notebook with its folders, files, and tasks.
    pub async fn delete_notebook(
        &self,
        ctx: &RequestContext,
        notebook_id: &NotebookId,
    ) -> AppResult<bool> {
        let deleted = self.notebook_repo.delete(&ctx.user_id, notebook_id).await?;
        if deleted {
            info!(request_id = %ctx.request_id, notebook_id = %notebook_id, "Deleted notebook");
        }
        Ok(deleted)
    }

    /// Exports a notebook as a ZIP archive named after its title.
    pub async fn export_notebook(
        &self,
        ctx: &RequestContext,
        notebook_id: &NotebookId,
    ) -> AppResult<ExportArchive> {
        let notebook = self.get_notebook(ctx, notebook_id).await?;
        self.export
            .export_notebook(ctx, &notebook.id, Some(&notebook.title))
            .await
    }
}
