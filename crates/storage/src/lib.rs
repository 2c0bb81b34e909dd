//! Object storage for uploaded media.
//!
//! [`ObjectStore`] is the seam the API talks to. [`s3::S3Store`] is the
//! production backend; [`memory::InMemoryStore`] keeps objects in process
//! for tests and local runs without a bucket. [`key`] holds the pure
//! functions that mint upload keys and map between keys and public URLs.

use std::time::Duration;

use async_trait::async_trait;

pub mod config;
pub mod key;
pub mod memory;
pub mod s3;

pub use config::StorageConfig;
pub use memory::InMemoryStore;
pub use s3::S3Store;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object storage is not configured")]
    NotConfigured,

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Put/delete/URL operations over a single bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket every key lives in.
    fn bucket(&self) -> &str;

    /// Public URL an uploaded object is reachable at.
    fn public_url(&self, key: &str) -> String;

    /// Recover the object key from a URL produced by [`ObjectStore::public_url`].
    fn key_from_url(&self, url: &str) -> Result<String, StorageError> {
        key::url_to_key(url, self.bucket())
    }

    /// Store `body` under `key` and return its public URL.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str)
        -> Result<String, StorageError>;

    /// Remove the object at `key`.
    ///
    /// Fails with [`StorageError::NotFound`] when no such object exists.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Time-limited download URL for `key`.
    async fn presigned_url(&self, key: &str, expires_in: Duration)
        -> Result<String, StorageError>;
}
