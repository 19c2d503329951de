//! Notebook export: folder-tree reconstruction and ZIP assembly.

pub mod archive;
pub mod content;
pub mod error;
pub mod path;
pub mod service;

pub use archive::{ArchiveOutput, ArchivePlan, archive_root_name, sanitize_name};
pub use content::ContentResolver;
pub use error::ExportError;
pub use path::FolderIndex;
pub use service::{ExportArchive, ExportService};
