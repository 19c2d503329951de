//! Folder management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_core::types::{FolderId, NotebookId};
use notehub_service::export::FolderIndex;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Acting user ID
    #[arg(short, long)]
    pub user: String,

    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List a notebook's folders with their resolved paths
    List {
        /// Notebook ID
        notebook: String,
    },
    /// Create a folder
    Create {
        /// Notebook ID
        notebook: String,
        /// Folder name
        name: String,
        /// Parent folder ID
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        id: String,
        /// New name
        name: String,
    },
    /// Move a folder under another parent, or to the root when omitted
    Move {
        /// Folder ID
        id: String,
        /// New parent folder ID
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Delete a folder; its files move to the notebook root
    Delete {
        /// Folder ID
        id: String,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Path inside the notebook
    path: String,
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = super::user_context(&args.user)?;
    let services = super::Services::connect(config).await?;
    let folders = &services.folders;

    match &args.command {
        FolderCommand::List { notebook } => {
            let notebook = NotebookId::parse(notebook)?;
            let list = folders.list_folders(&ctx, &notebook).await?;
            let index = FolderIndex::new(&list);
            let mut rows: Vec<FolderRow> = list
                .iter()
                .map(|f| FolderRow {
                    id: f.id.to_string(),
                    name: f.name.clone(),
                    path: index.resolve_path(f),
                })
                .collect();
            rows.sort_by(|a, b| a.path.cmp(&b.path));
            output::print_list(&rows, format);
        }
        FolderCommand::Create {
            notebook,
            name,
            parent,
        } => {
            let notebook = NotebookId::parse(notebook)?;
            let parent = parent.as_deref().map(FolderId::parse).transpose()?;
            let folder = folders.create_folder(&ctx, &notebook, name, parent).await?;
            output::print_success(&format!("Created folder '{}' ({})", folder.name, folder.id));
        }
        FolderCommand::Rename { id, name } => {
            let folder = folders.rename_folder(&ctx, &FolderId::parse(id)?, name).await?;
            output::print_success(&format!("Renamed folder to '{}'", folder.name));
        }
        FolderCommand::Move { id, parent } => {
            let parent = parent.as_deref().map(FolderId::parse).transpose()?;
            let folder = folders.move_folder(&ctx, &FolderId::parse(id)?, parent).await?;
            output::print_success(&format!("Moved folder '{}'", folder.name));
        }
        FolderCommand::Delete { id } => {
            let id = FolderId::parse(id)?;
            if folders.delete_folder(&ctx, &id).await? {
                output::print_success(&format!("Deleted folder {id}"));
            } else {
                return Err(AppError::not_found(format!("Folder {id} not found")));
            }
        }
    }

    Ok(())
}
