//! S3/R2 object storage for phrase audio.

use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client, Config,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("S3 error: {0}")]
    S3(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Audio object not found: {0}")]
    NotFound(String),
}

/// S3/R2 storage service holding the generated MP3 objects.
pub struct StorageService {
    client: Client,
    bucket: String,
}

impl StorageService {
    /// Create a new storage service from environment variables.
    ///
    /// Required env vars:
    /// - S3_BUCKET: Bucket name
    /// - S3_REGION: Region (use "auto" for Cloudflare R2)
    /// - S3_ENDPOINT: Custom endpoint URL (required for R2)
    /// - S3_ACCESS_KEY: Access key ID
    /// - S3_SECRET_KEY: Secret access key
    pub async fn new() -> Result<Self, StorageError> {
        let bucket = std::env::var("S3_BUCKET")
            .map_err(|_| StorageError::Config("S3_BUCKET not set".to_string()))?;

        let region = std::env::var("S3_REGION").unwrap_or_else(|_| "auto".to_string());

        let endpoint = std::env::var("S3_ENDPOINT").ok();

        let access_key = std::env::var("S3_ACCESS_KEY")
            .map_err(|_| StorageError::Config("S3_ACCESS_KEY not set".to_string()))?;

        let secret_key = std::env::var("S3_SECRET_KEY")
            .map_err(|_| StorageError::Config("S3_SECRET_KEY not set".to_string()))?;

        let credentials = Credentials::new(access_key, secret_key, None, None, "env");

        let mut config_builder = Config::builder()
            .region(Region::new(region))
            .credentials_provider(credentials)
            .behavior_version_latest();

        if let Some(endpoint_url) = endpoint {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        let config = config_builder.build();
        let client = Client::from_conf(config);

        Ok(Self { client, bucket })
    }

    /// Upload an audio object, overwriting any previous version.
    pub async fn upload_audio(&self, filename: &str, content: &[u8]) -> Result<(), StorageError> {
        let body = ByteStream::from(content.to_vec());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(filename)
            .body(body)
            .content_type("audio/mpeg")
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        tracing::info!("Uploaded audio object: {}", filename);
        Ok(())
    }

    /// Download an audio object's bytes.
    pub async fn download_audio(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(filename)
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("NoSuchKey") || err_str.contains("not found") {
                    StorageError::NotFound(filename.to_string())
                } else {
                    StorageError::S3(err_str)
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(bytes)
    }

    /// Delete an audio object.
    pub async fn delete_audio(&self, filename: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(filename)
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        tracing::info!("Deleted audio object: {}", filename);
        Ok(())
    }
}
