//! Photos and videos attached to a memory.

use keepsake_core::media::MediaType;
use keepsake_core::types::{DbId, Timestamp};
use keepsake_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: DbId,
    pub url: String,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub media_type: MediaType,
    pub caption: Option<String>,
    pub memory_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for one entry of a new memory's `mediaItems`.
///
/// The owning memory id is assigned by the create transaction, so any
/// `memoryId` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaItem {
    #[validate(custom(function = "not_blank"))]
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub caption: Option<String>,
}
