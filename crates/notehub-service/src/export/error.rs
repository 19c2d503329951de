//! Export pipeline errors.

use notehub_core::error::{AppError, ErrorKind};

/// Errors raised while producing a notebook archive.
///
/// Per-entry problems never surface here; they are logged and the entry is
/// skipped. These variants cover failures of the archive as a whole.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// ZIP library error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error while writing the in-memory buffer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking archive task panicked or was cancelled.
    #[error("Archive task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        let message = format!("Failed to build notebook archive: {err}");
        AppError::with_source(ErrorKind::Internal, message, err)
    }
}
