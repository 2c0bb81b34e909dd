//! Timeline annotations: the one-to-one marker that puts a memory on the
//! chronological timeline.

use keepsake_core::types::{DbId, MemoryDate, Timestamp};
use keepsake_core::validation::{IMPORTANCE_MAX, IMPORTANCE_MIN};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `timeline_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub date: MemoryDate,
    pub importance: i16,
    pub memory_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a timeline event nested inside a new memory.
///
/// `title` and `date` fall back to the memory's own values; `importance`
/// falls back to [`keepsake_core::validation::DEFAULT_IMPORTANCE`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimelineEvent {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "keepsake_core::date::option::deserialize")]
    pub date: Option<MemoryDate>,
    #[validate(range(min = IMPORTANCE_MIN, max = IMPORTANCE_MAX))]
    pub importance: Option<i16>,
}
