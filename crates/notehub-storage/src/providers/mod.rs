//! Storage provider implementations.

pub mod local;
pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

pub use local::LocalStorageProvider;
pub use memory::MemoryStorageProvider;
#[cfg(feature = "s3")]
pub use s3::S3StorageProvider;
