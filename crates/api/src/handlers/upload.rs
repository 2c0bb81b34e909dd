//! Handlers for media uploads to object storage.
//!
//! Objects are addressed by key (`memories/images/...`). Routes that take a
//! `{key}` path segment expect it percent-encoded, and also accept the full
//! public URL returned by [`upload_file`].

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use keepsake_core::media::MediaType;
use keepsake_storage::{key, ObjectStore};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, QueryParams};
use crate::query::PresignParams;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// Result of a successful upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
    pub key: String,
    pub resource_type: MediaType,
}

/// A time-limited download URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlResponse {
    pub url: String,
    pub expires_in: u64,
}

struct UploadedFile {
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

/// POST /api/v1/upload
///
/// Accepts a multipart form with a required `file` field. The object is
/// stored under `memories/images/` or `memories/videos/` depending on its
/// MIME type.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let storage = state.storage()?;

    let mut file: Option<UploadedFile> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue; // ignore unknown fields
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| key::content_type_of(&file_name).to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        file = Some(UploadedFile {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    let file = file.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;

    let resource_type = MediaType::from_mime(&file.content_type);
    let object_key = key::upload_key(resource_type, &file.file_name);
    let size = file.data.len();
    let url = storage
        .put(&object_key, file.data, &file.content_type)
        .await?;

    tracing::info!(
        key = %object_key,
        size,
        content_type = %file.content_type,
        "File uploaded",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResponse {
                url,
                key: object_key,
                resource_type,
            },
        }),
    ))
}

/// DELETE /api/v1/upload/{key}
///
/// Delete an uploaded object by key or by its public URL.
pub async fn delete_file(
    State(state): State<AppState>,
    PathParam(raw): PathParam<String>,
) -> AppResult<impl IntoResponse> {
    let storage = state.storage()?;
    let object_key = resolve_key(storage, &raw)?;

    storage.delete(&object_key).await?;

    tracing::info!(key = %object_key, "File deleted");

    Ok(Json(SuccessResponse::with_message("File deleted successfully")))
}

/// GET /api/v1/upload/{key}/url
///
/// Presigned download URL for an uploaded object, valid for `?expiresIn=`
/// seconds (default one hour, at most seven days).
pub async fn presigned_url(
    State(state): State<AppState>,
    PathParam(raw): PathParam<String>,
    QueryParams(params): QueryParams<PresignParams>,
) -> AppResult<impl IntoResponse> {
    let storage = state.storage()?;

    let expires_in = params
        .expires_in
        .unwrap_or(PresignParams::DEFAULT_EXPIRES_IN);
    if expires_in == 0 || expires_in > PresignParams::MAX_EXPIRES_IN {
        return Err(AppError::BadRequest(format!(
            "expiresIn must be between 1 and {} seconds",
            PresignParams::MAX_EXPIRES_IN
        )));
    }

    let object_key = resolve_key(storage, &raw)?;
    let url = storage
        .presigned_url(&object_key, Duration::from_secs(expires_in))
        .await?;

    tracing::debug!(key = %object_key, expires_in, "Presigned URL issued");

    Ok(Json(DataResponse {
        data: PresignedUrlResponse { url, expires_in },
    }))
}

/// The path segment is either a bare key or a full object URL.
fn resolve_key(storage: &Arc<dyn ObjectStore>, raw: &str) -> Result<String, AppError> {
    if raw.starts_with("https://") || raw.starts_with("http://") {
        Ok(storage.key_from_url(raw)?)
    } else {
        key::validate_key(raw)?;
        Ok(raw.to_string())
    }
}
