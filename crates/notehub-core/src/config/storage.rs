//! Blob storage configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StorageConfig {
    /// Which provider backs blob storage: `"local"`, `"memory"` or `"s3"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    #[validate(nested)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local blob storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

/// S3-compatible object storage configuration (SeaweedFS, MinIO, AWS).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct S3StorageConfig {
    /// S3 endpoint URL.
    #[serde(default = "default_endpoint")]
    #[validate(url)]
    pub endpoint: String,
    /// Region name.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket holding all file blobs.
    #[serde(default = "default_bucket")]
    #[validate(length(min = 3, max = 63))]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Use path-style addressing (`endpoint/bucket/key`).
    #[serde(default = "default_true")]
    pub force_path_style: bool,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            region: default_region(),
            bucket: default_bucket(),
            access_key: String::new(),
            secret_key: String::new(),
            force_path_style: true,
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_local_root() -> String {
    "./data/blobs".to_string()
}

fn default_endpoint() -> String {
    "http://seaweedfs:8333".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket() -> String {
    "my-local-bucket".to_string()
}

fn default_true() -> bool {
    true
}
