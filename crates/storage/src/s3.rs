//! Amazon S3 (or S3-compatible) backend.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;

use crate::config::StorageConfig;
use crate::key::{self, encode_key};
use crate::{ObjectStore, StorageError};

/// [`ObjectStore`] backed by an S3 bucket.
///
/// Credentials come from the default AWS provider chain (environment,
/// shared profile, instance role).
pub struct S3Store {
    client: Client,
    config: StorageConfig,
}

impl S3Store {
    /// Build a client for the configured bucket and region.
    pub async fn connect(config: StorageConfig) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = Client::from_conf(builder.build());

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint,
            "S3 client initialized",
        );

        Self { client, config }
    }
}

fn backend_error<E>(action: &str, key: &str, err: E) -> StorageError
where
    E: std::error::Error,
{
    let detail = DisplayErrorContext(err).to_string();
    tracing::error!(key, error = %detail, "S3 {action} failed");
    StorageError::Backend(format!("failed to {action} '{key}': {detail}"))
}

#[async_trait]
impl ObjectStore for S3Store {
    fn bucket(&self) -> &str {
        &self.config.bucket
    }

    fn public_url(&self, key: &str) -> String {
        match &self.config.endpoint {
            Some(endpoint) => format!("{endpoint}/{}/{}", self.config.bucket, encode_key(key)),
            None => key::public_url(&self.config.bucket, &self.config.region, key),
        }
    }

    fn key_from_url(&self, url: &str) -> Result<String, StorageError> {
        if let Some(endpoint) = &self.config.endpoint {
            let prefix = format!("{endpoint}/{}/", self.config.bucket);
            if let Some(rest) = url.strip_prefix(&prefix) {
                let rest = rest.split(['?', '#']).next().unwrap_or(rest);
                return urlencoding::decode(rest)
                    .map(|k| k.into_owned())
                    .map_err(|_| StorageError::InvalidUrl(url.to_string()));
            }
        }
        key::url_to_key(url, &self.config.bucket)
    }

    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        key::validate_key(key)?;
        let size = body.len();

        let mut request = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body));
        if self.config.public_read {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }
        request
            .send()
            .await
            .map_err(|e| backend_error("upload", key, e))?;

        tracing::info!(key, size, content_type, "Uploaded object to S3");
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        key::validate_key(key)?;

        // DeleteObject succeeds for missing keys, so probe first.
        if let Err(err) = self
            .client
            .head_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
        {
            let missing = err
                .as_service_error()
                .map(|e| e.is_not_found())
                .unwrap_or(false);
            if missing {
                return Err(StorageError::NotFound(key.to_string()));
            }
            return Err(backend_error("inspect", key, err));
        }

        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| backend_error("delete", key, e))?;

        tracing::info!(key, "Deleted object from S3");
        Ok(())
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        key::validate_key(key)?;
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Backend(format!("invalid presign expiry: {e}")))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| backend_error("presign", key, e))?;

        Ok(request.uri().to_string())
    }
}
