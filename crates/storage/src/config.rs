/// Object storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket name (`AWS_BUCKET_NAME`, required).
    pub bucket: String,
    /// Bucket region (default: `us-east-1`).
    pub region: String,
    /// Custom S3-compatible endpoint such as MinIO. Switches to path-style URLs.
    pub endpoint: Option<String>,
    /// Upload objects with the `public-read` canned ACL (default: `true`).
    pub public_read: bool,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` when `AWS_BUCKET_NAME` is unset or empty, which the
    /// API treats as "storage not configured".
    ///
    /// | Env Var               | Default     |
    /// |-----------------------|-------------|
    /// | `AWS_BUCKET_NAME`     | (none)      |
    /// | `AWS_REGION`          | `us-east-1` |
    /// | `AWS_ENDPOINT_URL`    | (none)      |
    /// | `STORAGE_PUBLIC_READ` | `true`      |
    pub fn from_env() -> Option<Self> {
        let bucket = std::env::var("AWS_BUCKET_NAME")
            .ok()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())?;

        let region = std::env::var("AWS_REGION")
            .ok()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| crate::key::DEFAULT_REGION.into());

        let endpoint = std::env::var("AWS_ENDPOINT_URL")
            .ok()
            .map(|e| e.trim().trim_end_matches('/').to_string())
            .filter(|e| !e.is_empty());

        let public_read: bool = std::env::var("STORAGE_PUBLIC_READ")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("STORAGE_PUBLIC_READ must be true or false");

        Some(Self {
            bucket,
            region,
            endpoint,
            public_read,
        })
    }
}
