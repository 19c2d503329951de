//! Core traits defined in `notehub-core` and implemented by other crates.

pub mod repository;
pub mod storage;

pub use repository::NotebookListing;
pub use storage::StorageProvider;
