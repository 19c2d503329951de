//! Storage provider selection from configuration.

use std::sync::Arc;

use tracing::info;

use notehub_core::config::StorageConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::traits::StorageProvider;

use crate::providers::{LocalStorageProvider, MemoryStorageProvider};

/// Build the configured blob storage provider.
pub async fn build_provider(config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
    let provider: Arc<dyn StorageProvider> = match config.provider.as_str() {
        "local" => Arc::new(LocalStorageProvider::new(&config.local.root_path).await?),
        "memory" => Arc::new(MemoryStorageProvider::new()),
        #[cfg(feature = "s3")]
        "s3" => Arc::new(crate::providers::S3StorageProvider::new(&config.s3).await?),
        #[cfg(not(feature = "s3"))]
        "s3" => {
            return Err(AppError::configuration(
                "S3 storage requested but notehub-storage was built without the `s3` feature",
            ));
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown storage provider '{other}' (expected 'local', 'memory' or 's3')"
            )));
        }
    };

    info!(provider = provider.provider_type(), "Storage provider ready");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notehub_core::error::ErrorKind;

    #[tokio::test]
    async fn test_build_local_provider() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorageConfig::default();
        config.local.root_path = dir.path().to_string_lossy().into_owned();

        let provider = build_provider(&config).await.unwrap();
        assert_eq!(provider.provider_type(), "local");
        assert!(provider.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let config = StorageConfig {
            provider: "ftp".to_string(),
            ..StorageConfig::default()
        };
        let err = build_provider(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
