use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use keepsake_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats
///
/// Row counts for memories, locations, media items and timeline events.
pub async fn dataset_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = StatsRepo::dataset_stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
