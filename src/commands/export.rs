//! Notebook export command.

use std::path::PathBuf;

use clap::Args;

use crate::output;
use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_core::types::NotebookId;

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Acting user ID
    #[arg(short, long)]
    pub user: String,

    /// Notebook ID
    pub notebook: String,

    /// Output path; defaults to `<notebook title>.zip` in the current directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Export a notebook and write the archive to disk.
pub async fn execute(args: &ExportArgs, config: &AppConfig) -> Result<(), AppError> {
    let ctx = super::user_context(&args.user)?;
    let notebook = NotebookId::parse(&args.notebook)?;
    let services = super::Services::connect(config).await?;

    let archive = services.notebooks.export_notebook(&ctx, &notebook).await?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&archive.file_name));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &archive.data).await?;

    output::print_success(&format!(
        "Exported {} entries ({} bytes) to {}",
        archive.entries,
        archive.data.len(),
        path.display()
    ));
    if archive.skipped > 0 {
        output::print_warning(&format!(
            "{} file(s) were skipped (duplicate names or write errors)",
            archive.skipped
        ));
    }
    Ok(())
}
