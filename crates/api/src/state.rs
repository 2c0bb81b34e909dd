use std::sync::Arc;

use keepsake_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: keepsake_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object store for uploaded media. `None` when no bucket is configured.
    pub storage: Option<Arc<dyn ObjectStore>>,
}

impl AppState {
    /// The configured object store, or [`StorageError::NotConfigured`].
    ///
    /// [`StorageError::NotConfigured`]: keepsake_storage::StorageError::NotConfigured
    pub fn storage(&self) -> Result<&Arc<dyn ObjectStore>, keepsake_storage::StorageError> {
        self.storage
            .as_ref()
            .ok_or(keepsake_storage::StorageError::NotConfigured)
    }
}
