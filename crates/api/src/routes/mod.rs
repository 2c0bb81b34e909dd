pub mod health;
pub mod memory;
pub mod stats;
pub mod upload;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /memories                                        list (?timelineOnly=), create
/// /memories/{id}                                   get, update, delete
///
/// /upload                                          multipart upload (field `file`)
/// /upload/{key}                                    delete object (key or public URL)
/// /upload/{key}/url                                presigned download URL (?expiresIn=)
///
/// /stats                                           dataset counts
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/memories", memory::router())
        .nest("/upload", upload::router(config.max_upload_bytes))
        .nest("/stats", stats::router())
}
