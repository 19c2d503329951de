//! # notehub-service
//!
//! Business logic service layer for NoteHub. Each service orchestrates
//! repositories, blob storage, and external processes to implement an
//! application-level use case.
//!
//! Services take their dependencies at construction time as `Arc`s and
//! receive a [`RequestContext`] naming the acting user on every call.

pub mod context;
pub mod export;
pub mod file;
pub mod folder;
pub mod llm;
pub mod notebook;

pub use context::RequestContext;
pub use export::{ExportArchive, ExportService};
pub use file::{AudioTranscoder, FileService, UploadRequest};
pub use folder::FolderService;
pub use llm::{KeyUsage, LlmProxyClient};
pub use notebook::{NotebookService, TemplateService};
