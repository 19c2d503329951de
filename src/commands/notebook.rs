//! Notebook management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_core::types::NotebookId;
use notehub_entity::notebook::{CreateNotebook, Notebook, UpdateNotebook};
use notehub_entity::task::Task;

/// Arguments for notebook commands
#[derive(Debug, Args)]
pub struct NotebookArgs {
    /// Acting user ID
    #[arg(short, long)]
    pub user: String,

    /// Notebook subcommand
    #[command(subcommand)]
    pub command: NotebookCommand,
}

/// Notebook subcommands
#[derive(Debug, Subcommand)]
pub enum NotebookCommand {
    /// List the user's notebooks
    List,
    /// Create a notebook with the starter template
    Create {
        /// Title
        title: String,
        /// Card emoji
        #[arg(long, default_value = "📓")]
        emoji: String,
        /// Date label (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show one notebook
    Show {
        /// Notebook ID
        id: String,
    },
    /// Change a notebook's card
    Update {
        /// Notebook ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New emoji
        #[arg(long)]
        emoji: Option<String>,
        /// New date label
        #[arg(long)]
        date: Option<String>,
        /// New background colour
        #[arg(long)]
        bg_color: Option<String>,
        /// New text colour
        #[arg(long)]
        text_color: Option<String>,
    },
    /// List a notebook's Kanban tasks
    Tasks {
        /// Notebook ID
        id: String,
    },
    /// Delete a notebook
    Delete {
        /// Notebook ID
        id: String,
    },
}

/// Notebook display row
#[derive(Debug, Serialize, Tabled)]
struct NotebookRow {
    /// Notebook ID
    id: String,
    /// Emoji
    emoji: String,
    /// Title
    title: String,
    /// Date label
    date: String,
    /// Created
    created: String,
}

impl From<&Notebook> for NotebookRow {
    fn from(n: &Notebook) -> Self {
        Self {
            id: n.id.to_string(),
            emoji: n.emoji.clone(),
            title: n.title.clone(),
            date: n.date.clone(),
            created: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Task display row
#[derive(Debug, Serialize, Tabled)]
struct TaskRow {
    /// Column
    status: String,
    /// Position in the column
    position: i32,
    /// Title
    title: String,
    /// Priority
    priority: String,
    /// Due date
    due: String,
    /// Tags
    tags: String,
}

impl From<&Task> for TaskRow {
    fn from(t: &Task) -> Self {
        Self {
            status: t.status.to_string(),
            position: t.position,
            title: t.title.clone(),
            priority: t.priority.to_string(),
            due: t.due_date.map(|d| d.to_string()).unwrap_or_default(),
            tags: t.tags.join(", "),
        }
    }
}

/// Execute notebook commands
pub async fn execute(
    args: &NotebookArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = super::user_context(&args.user)?;
    let services = super::Services::connect(config).await?;

    match &args.command {
        NotebookCommand::List => {
            let notebooks = services.notebooks.list_notebooks_for_user(&ctx).await?;
            let rows: Vec<NotebookRow> = notebooks.iter().map(NotebookRow::from).collect();
            output::print_list(&rows, format);
        }
        NotebookCommand::Create { title, emoji, date } => {
            let date = date
                .clone()
                .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            let notebook = services
                .notebooks
                .create_notebook(&ctx, CreateNotebook::new(ctx.user_id, emoji, title, date))
                .await?;
            match format {
                OutputFormat::Json => output::print_item(&notebook, format),
                OutputFormat::Table => {
                    output::print_success(&format!("Created notebook '{}'", notebook.title));
                    output::print_kv("ID", &notebook.id.to_string());
                }
            }
        }
        NotebookCommand::Show { id } => {
            let notebook = services
                .notebooks
                .get_notebook(&ctx, &NotebookId::parse(id)?)
                .await?;
            output::print_item(&notebook, format);
        }
        NotebookCommand::Update {
            id,
            title,
            emoji,
            date,
            bg_color,
            text_color,
        } => {
            let id = NotebookId::parse(id)?;
            let update = UpdateNotebook {
                emoji: emoji.clone(),
                title: title.clone(),
                date: date.clone(),
                bg_color: bg_color.clone(),
                text_color: text_color.clone(),
            };
            let notebook = services
                .notebooks
                .update_notebook(&ctx, &id, update)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Notebook {id} not found")))?;
            output::print_list(&[NotebookRow::from(&notebook)], format);
        }
        NotebookCommand::Tasks { id } => {
            let tasks = services
                .tasks
                .list_by_notebook(&ctx.user_id, &NotebookId::parse(id)?)
                .await?;
            let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
            output::print_list(&rows, format);
        }
        NotebookCommand::Delete { id } => {
            let id = NotebookId::parse(id)?;
            if services.notebooks.delete_notebook(&ctx, &id).await? {
                output::print_success(&format!("Deleted notebook {id}"));
            } else {
                return Err(AppError::not_found(format!("Notebook {id} not found")));
            }
        }
    }

    Ok(())
}
