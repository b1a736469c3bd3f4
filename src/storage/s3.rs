//! S3-compatible object storage implementation.
//!
//! Artifacts are uploaded to `{bucket}/{prefix}/{key}` with a JSON content
//! type and a public Cache-Control header so they can be served directly.

use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::StorageConfig;
use crate::storage::{ArtifactStorage, JSON_CONTENT_TYPE};

/// S3-backed artifact storage.
pub struct S3Storage {
    client: Client,
    bucket: String,
    prefix: String,
    cache_control: String,
}

impl S3Storage {
    /// Create a new S3 storage instance.
    pub fn new(
        client: Client,
        bucket: impl Into<String>,
        prefix: impl Into<String>,
        cache_control: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
            cache_control: cache_control.into(),
        }
    }

    /// Build a client from the storage settings and the AWS credential chain.
    ///
    /// A custom endpoint switches to path-style addressing, which most
    /// S3-compatible providers expect.
    pub async fn from_config(config: &StorageConfig) -> Result<Self> {
        if config.bucket.trim().is_empty() {
            return Err(AppError::config("storage.bucket is empty"));
        }

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Ok(Self::new(
            Client::from_conf(s3_config),
            &config.bucket,
            &config.prefix,
            &config.cache_control,
        ))
    }

    /// Full object key for an artifact name.
    fn object_key(&self, key: &str) -> String {
        object_key(&self.prefix, key)
    }
}

fn object_key(prefix: &str, key: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}/{key}")
    }
}

#[async_trait]
impl ArtifactStorage for S3Storage {
    async fn put_json(&self, key: &str, body: Vec<u8>) -> Result<String> {
        let object_key = self.object_key(key);
        let size = body.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .body(ByteStream::from(body))
            .content_type(JSON_CONTENT_TYPE)
            .cache_control(&self.cache_control)
            .send()
            .await
            .map_err(|e| AppError::storage(&object_key, DisplayErrorContext(&e)))?;

        log::info!("Uploaded {} bytes to s3://{}/{}", size, self.bucket, object_key);
        Ok(format!("s3://{}/{}", self.bucket, object_key))
    }
}
