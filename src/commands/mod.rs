//! CLI command definitions and dispatch.

pub mod config;
pub mod export;
pub mod file;
pub mod folder;
pub mod migrate;
pub mod notebook;
pub mod plan;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_core::types::UserId;
use notehub_database::DatabasePool;
use notehub_database::repositories::{
    FileRepository, FolderRepository, NotebookRepository, TaskRepository,
};
use notehub_service::{
    AudioTranscoder, ExportService, FileService, FolderService, NotebookService, RequestContext,
    TemplateService,
};

/// NoteHub: notebooks of files, folders and tasks
#[derive(Debug, Parser)]
#[command(name = "notehub", version, about, long_about = None)]
pub struct Cli {
    /// Path to the base configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay, loaded from `config/<env>.toml` (defaults to `$NOTEHUB_ENV`)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Notebook management
    Notebook(notebook::NotebookArgs),
    /// Folder management
    Folder(folder::FolderArgs),
    /// File management
    File(file::FileArgs),
    /// Export a notebook as a ZIP archive
    Export(export::ExportArgs),
    /// LLM proxy keys and plans
    Plan(plan::PlanArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Load configuration named by the global flags.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        let env = self
            .env
            .clone()
            .or_else(|| std::env::var("NOTEHUB_ENV").ok());
        AppConfig::load(&self.config, env.as_deref())
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Notebook(args) => notebook::execute(args, &config, self.format).await,
            Commands::Folder(args) => folder::execute(args, &config, self.format).await,
            Commands::File(args) => file::execute(args, &config, self.format).await,
            Commands::Export(args) => export::execute(args, &config).await,
            Commands::Plan(args) => plan::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, &self.config, self.format),
        }
    }
}

/// Services backed by PostgreSQL and the configured blob store.
pub struct Services {
    /// Notebook lifecycle and export.
    pub notebooks: NotebookService,
    /// Folder management.
    pub folders: Arc<FolderService>,
    /// File records and blobs.
    pub files: Arc<FileService>,
    /// Kanban tasks.
    pub tasks: Arc<TaskRepository>,
}

impl Services {
    /// Connect to the database and blob store and build the service graph.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let pool = DatabasePool::connect(&config.database).await?.into_pool();
        let storage = notehub_storage::build_provider(&config.storage).await?;

        let file_repo = Arc::new(FileRepository::new(pool.clone()));
        let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
        let notebook_repo = Arc::new(NotebookRepository::new(pool.clone()));
        let task_repo = Arc::new(TaskRepository::new(pool));

        let transcoder = config
            .audio
            .enabled
            .then(|| AudioTranscoder::new(&config.audio));
        let files = Arc::new(FileService::new(
            Arc::clone(&file_repo),
            Arc::clone(&storage),
            transcoder,
        ));
        let folders = Arc::new(FolderService::new(Arc::clone(&folder_repo)));
        let templates = Arc::new(TemplateService::new(Arc::clone(&notebook_repo)));
        let export = Arc::new(ExportService::new(
            file_repo,
            folder_repo,
            storage,
            &config.export,
        ));

        Ok(Self {
            notebooks: NotebookService::new(notebook_repo, Some(templates), export),
            folders,
            files,
            tasks: task_repo,
        })
    }
}

/// Build the request context for the user named on the command line.
pub fn user_context(user: &str) -> Result<RequestContext, AppError> {
    Ok(RequestContext::new(UserId::parse(user)?))
}
