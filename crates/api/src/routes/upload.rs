//! Route definitions for media uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Upload routes mounted at `/upload`.
///
/// The body limit applies to the multipart upload only.
///
/// ```text
/// POST   /             -> upload_file
/// DELETE /{key}        -> delete_file
/// GET    /{key}/url    -> presigned_url
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(upload::upload_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/{key}", delete(upload::delete_file))
        .route("/{key}/url", get(upload::presigned_url))
}
