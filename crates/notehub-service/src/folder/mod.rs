//! Folder management.

pub mod service;

pub use service::{FolderService, validate_folder_name};
