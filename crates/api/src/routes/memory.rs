//! Route definitions for memories.

use axum::routing::get;
use axum::Router;

use crate::handlers::memory;
use crate::state::AppState;

/// Memory routes mounted at `/memories`.
///
/// ```text
/// GET    /        -> list_memories (?timelineOnly=)
/// POST   /        -> create_memory
/// GET    /{id}    -> get_memory
/// PUT    /{id}    -> update_memory
/// DELETE /{id}    -> delete_memory
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(memory::list_memories).post(memory::create_memory))
        .route(
            "/{id}",
            get(memory::get_memory)
                .put(memory::update_memory)
                .delete(memory::delete_memory),
        )
}
