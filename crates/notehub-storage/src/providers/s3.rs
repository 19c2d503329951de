//! S3-compatible object storage provider (requires the `s3` feature).

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info, warn};

use notehub_core::config::storage::S3StorageConfig;
use notehub_core::error::AppError;
use notehub_core::result::AppResult;
use notehub_core::traits::StorageProvider;

/// S3-compatible storage provider. All blobs live in one bucket, keyed by
/// their storage key.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
    endpoint: String,
}

impl S3StorageProvider {
    /// Create a new S3 storage provider from configuration.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 storage provider"
        );

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "notehub-config",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.clone())
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        let provider = Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        };
        provider.ensure_bucket().await;
        Ok(provider)
    }

    /// Create the bucket if it does not exist yet. Failures are logged only;
    /// the store may be unreachable at startup.
    async fn ensure_bucket(&self) {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            return;
        }

        match self.client.create_bucket().bucket(&self.bucket).send().await {
            Ok(_) => info!(bucket = %self.bucket, "Created S3 bucket"),
            Err(e) => warn!(
                bucket = %self.bucket,
                error = %DisplayErrorContext(&e),
                "Could not create S3 bucket"
            ),
        }
    }
}

#[async_trait]
impl StorageProvider for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok())
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    AppError::not_found(format!("Blob not found: {key}"))
                } else {
                    AppError::storage(format!(
                        "Failed to read blob {key}: {}",
                        DisplayErrorContext(&e)
                    ))
                }
            })?;

        let data = output.body.collect().await.map_err(|e| {
            AppError::storage(format!("Failed to read body of blob {key}: {e}"))
        })?;
        Ok(data.into_bytes())
    }

    async fn write(&self, key: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .set_content_type(content_type.map(str::to_string))
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to write blob {key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(key, bytes = size, "Wrote blob to S3");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to delete blob {key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(AppError::storage(format!(
                "Failed to stat blob {key}: {}",
                DisplayErrorContext(&e)
            ))),
        }
    }

    fn public_url(&self, key: &str) -> Option<String> {
        Some(format!("{}/{}/{}", self.endpoint, self.bucket, key))
    }
}
