//! File services: upload, CRUD, audio normalisation, and notebook context.

pub mod audio;
pub mod context;
pub mod naming;
pub mod service;

pub use audio::{AudioTranscoder, TranscodeError, TranscodedAudio};
pub use context::build_notebook_context;
pub use naming::{format_file_size, generate_unique_filename};
pub use service::{FileService, UploadRequest};
