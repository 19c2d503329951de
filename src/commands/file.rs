//! File management commands.

use std::path::PathBuf;

use bytes::Bytes;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_core::types::{FileId, FolderId, NotebookId};
use notehub_entity::file::{File, FileChanges, ProcessingStatus};
use notehub_service::UploadRequest;
use notehub_service::file::format_file_size;

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// Acting user ID
    #[arg(short, long)]
    pub user: String,

    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List files, optionally within one notebook
    List {
        /// Notebook ID
        #[arg(short, long)]
        notebook: Option<String>,
    },
    /// Upload a local file into a notebook
    Upload {
        /// Notebook ID
        notebook: String,
        /// Local path
        path: PathBuf,
        /// Target folder ID
        #[arg(long)]
        folder: Option<String>,
        /// Content type; guessed from the extension when omitted
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Print the text context of a notebook (text files and transcriptions)
    Context {
        /// Notebook ID
        notebook: String,
    },
    /// Show one file record
    Show {
        /// File ID
        id: String,
    },
    /// Store a transcription for an audio file and mark it completed
    Transcript {
        /// File ID
        id: String,
        /// Transcribed text
        text: String,
    },
    /// Delete a file and its blob
    Delete {
        /// File ID
        id: String,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// File ID
    id: String,
    /// Name
    name: String,
    /// Content type
    content_type: String,
    /// Size
    size: String,
    /// Processing status
    status: String,
}

impl From<&File> for FileRow {
    fn from(f: &File) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.filename.clone(),
            content_type: f.content_type.clone().unwrap_or_default(),
            size: format_file_size(f.file_size_bytes.unwrap_or(0)),
            status: format!("{:?}", f.processing_status).to_lowercase(),
        }
    }
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = super::user_context(&args.user)?;
    let services = super::Services::connect(config).await?;
    let files = &services.files;

    match &args.command {
        FileCommand::List { notebook } => {
            let notebook = notebook.as_deref().map(NotebookId::parse).transpose()?;
            let list = files.list_files(&ctx, notebook.as_ref()).await?;
            let rows: Vec<FileRow> = list.iter().map(FileRow::from).collect();
            output::print_list(&rows, format);
        }
        FileCommand::Upload {
            notebook,
            path,
            folder,
            content_type,
        } => {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| AppError::validation("Upload path has no file name"))?;
            let data = tokio::fs::read(path).await?;
            let file = files
                .upload(
                    &ctx,
                    UploadRequest {
                        notebook_id: Some(NotebookId::parse(notebook)?),
                        folder_id: folder.as_deref().map(FolderId::parse).transpose()?,
                        filename,
                        content_type: content_type.clone(),
                        data: Bytes::from(data),
                    },
                )
                .await?;
            output::print_list(&[FileRow::from(&file)], format);
        }
        FileCommand::Context { notebook } => {
            let text = files
                .notebook_context(&ctx, &NotebookId::parse(notebook)?)
                .await?;
            println!("{text}");
        }
        FileCommand::Show { id } => {
            let file = files.get_file(&ctx, &FileId::parse(id)?).await?;
            output::print_item(&file, format);
        }
        FileCommand::Transcript { id, text } => {
            let id = FileId::parse(id)?;
            let changes = FileChanges {
                processing_status: Some(ProcessingStatus::Completed),
                processing_result: Some(serde_json::json!({ "transcription": text })),
                ..FileChanges::default()
            };
            let file = files
                .update_file(&ctx, &id, changes, true)
                .await?
                .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
            output::print_success(&format!("Stored transcription for '{}'", file.filename));
        }
        FileCommand::Delete { id } => {
            let id = FileId::parse(id)?;
            if files.delete_file(&ctx, &id).await? {
                output::print_success(&format!("Deleted file {id}"));
            } else {
                return Err(AppError::not_found(format!("File {id} not found")));
            }
        }
    }

    Ok(())
}
