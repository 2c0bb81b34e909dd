//! Memories: the aggregate root of the journal.

use keepsake_core::types::{DbId, MemoryDate, Timestamp};
use keepsake_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::location::{CreateLocation, Location};
use super::media::{CreateMediaItem, Media};
use super::timeline_event::{CreateTimelineEvent, TimelineEvent};

/// A row from the `memories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub date: MemoryDate,
    pub location_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A memory with its location, media items and timeline event joined in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryWithRelations {
    #[serde(flatten)]
    pub memory: Memory,
    pub location: Option<Location>,
    pub media_items: Vec<Media>,
    pub timeline_event: Option<TimelineEvent>,
}

/// Input for creating a memory together with its related rows.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoryInput {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "keepsake_core::date::deserialize")]
    pub date: MemoryDate,
    #[validate(nested)]
    pub location: Option<CreateLocation>,
    #[validate(nested)]
    pub timeline_event: Option<CreateTimelineEvent>,
    #[serde(default)]
    #[validate(nested)]
    pub media_items: Vec<CreateMediaItem>,
}

/// Input for updating a memory's scalar fields.
///
/// Relation keys (`location`, `mediaItems`, `timelineEvent`) are not part
/// of this type; serde drops them along with any other unknown key.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemoryInput {
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "keepsake_core::date::option::deserialize")]
    pub date: Option<MemoryDate>,
}

impl UpdateMemoryInput {
    /// `true` when no updatable field was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.date.is_none()
    }
}
