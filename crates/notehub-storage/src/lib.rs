//! # notehub-storage
//!
//! Blob storage providers for NoteHub file bytes. Supports the local
//! filesystem and S3-compatible object stores (SeaweedFS, MinIO, AWS).

pub mod manager;
pub mod mime;
pub mod providers;

pub use manager::build_provider;
pub use mime::guess_content_type;
