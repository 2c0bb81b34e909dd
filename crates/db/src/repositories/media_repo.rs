//! Repository for the `media` table.

use keepsake_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::media::{CreateMediaItem, Media};

/// Column list for the `media` table.
const COLUMNS: &str = "id, url, media_type, caption, memory_id, created_at, updated_at";

/// Provides insert and lookup operations for media items.
pub struct MediaRepo;

impl MediaRepo {
    /// Insert one media item for `memory_id` on an existing connection or
    /// transaction.
    pub async fn create_in(
        conn: &mut PgConnection,
        memory_id: DbId,
        input: &CreateMediaItem,
    ) -> Result<Media, sqlx::Error> {
        let query = format!(
            "INSERT INTO media (url, media_type, caption, memory_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(&input.url)
            .bind(input.media_type.as_str())
            .bind(&input.caption)
            .bind(memory_id)
            .fetch_one(conn)
            .await
    }

    /// List the media of one memory in insertion order.
    pub async fn list_by_memory(pool: &PgPool, memory_id: DbId) -> Result<Vec<Media>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media WHERE memory_id = $1 ORDER BY id");
        sqlx::query_as::<_, Media>(&query)
            .bind(memory_id)
            .fetch_all(pool)
            .await
    }

    /// List the media of every memory in `memory_ids`, ordered by memory then
    /// insertion order.
    pub async fn list_by_memory_ids_in(
        conn: &mut PgConnection,
        memory_ids: &[DbId],
    ) -> Result<Vec<Media>, sqlx::Error> {
        if memory_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM media WHERE memory_id = ANY($1) ORDER BY memory_id, id"
        );
        sqlx::query_as::<_, Media>(&query)
            .bind(memory_ids)
            .fetch_all(conn)
            .await
    }
}
