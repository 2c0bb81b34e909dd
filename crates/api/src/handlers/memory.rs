//! Handlers for memories and their nested location, media and timeline event.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use keepsake_core::error::CoreError;
use keepsake_core::types::DbId;
use keepsake_core::validation::validate_input;
use keepsake_db::models::memory::{CreateMemoryInput, UpdateMemoryInput};
use keepsake_db::repositories::MemoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::query::ListMemoriesParams;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

fn memory_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Memory",
        id,
    })
}

/// GET /api/v1/memories
///
/// List memories with relations, newest date first. `?timelineOnly=true`
/// keeps only memories that carry a timeline event.
pub async fn list_memories(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListMemoriesParams>,
) -> AppResult<impl IntoResponse> {
    let memories = MemoryRepo::list(&state.pool, params.timeline_only).await?;

    tracing::debug!(
        count = memories.len(),
        timeline_only = params.timeline_only,
        "Listed memories",
    );

    Ok(Json(DataResponse { data: memories }))
}

/// GET /api/v1/memories/{id}
pub async fn get_memory(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<impl IntoResponse> {
    let memory = MemoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| memory_not_found(id))?;

    Ok(Json(DataResponse { data: memory }))
}

/// POST /api/v1/memories
///
/// Create a memory together with its optional location, timeline event and
/// media items. All rows are written in one transaction.
pub async fn create_memory(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMemoryInput>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let memory = MemoryRepo::create(&state.pool, &input).await?;

    tracing::info!(
        memory_id = memory.memory.id,
        media_count = memory.media_items.len(),
        "Memory created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: memory })))
}

/// PUT /api/v1/memories/{id}
///
/// Update `title`, `description` and/or `date`. Nested relation keys in the
/// body are ignored.
pub async fn update_memory(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<UpdateMemoryInput>,
) -> AppResult<impl IntoResponse> {
    if input.is_empty() {
        return Err(AppError::BadRequest(
            "No updatable fields provided (expected title, description or date)".into(),
        ));
    }
    validate_input(&input)?;

    let memory = MemoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| memory_not_found(id))?;

    tracing::info!(memory_id = id, "Memory updated");

    Ok(Json(DataResponse { data: memory }))
}

/// DELETE /api/v1/memories/{id}
///
/// Media items and the timeline event are removed with the memory.
pub async fn delete_memory(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<impl IntoResponse> {
    if !MemoryRepo::delete(&state.pool, id).await? {
        return Err(memory_not_found(id));
    }

    tracing::info!(memory_id = id, "Memory deleted");

    Ok(Json(SuccessResponse::ok()))
}
