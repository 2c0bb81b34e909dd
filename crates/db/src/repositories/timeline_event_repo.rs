//! Repository for the `timeline_events` table.

use keepsake_core::types::{DbId, MemoryDate};
use keepsake_core::validation::DEFAULT_IMPORTANCE;
use sqlx::{PgConnection, PgPool};

use crate::models::timeline_event::{CreateTimelineEvent, TimelineEvent};

/// Column list for the `timeline_events` table.
const COLUMNS: &str =
    "id, title, description, date, importance, memory_id, created_at, updated_at";

/// Provides insert and lookup operations for timeline events.
pub struct TimelineEventRepo;

impl TimelineEventRepo {
    /// Insert the timeline event of a memory on an existing connection or
    /// transaction.
    ///
    /// Missing `title`/`date` are taken from the owning memory.
    pub async fn create_in(
        conn: &mut PgConnection,
        memory_id: DbId,
        memory_title: &str,
        memory_date: MemoryDate,
        input: &CreateTimelineEvent,
    ) -> Result<TimelineEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO timeline_events (title, description, date, importance, memory_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimelineEvent>(&query)
            .bind(input.title.as_deref().unwrap_or(memory_title))
            .bind(&input.description)
            .bind(input.date.unwrap_or(memory_date))
            .bind(input.importance.unwrap_or(DEFAULT_IMPORTANCE))
            .bind(memory_id)
            .fetch_one(conn)
            .await
    }

    /// Find the timeline event attached to a memory, if any.
    pub async fn find_by_memory(
        pool: &PgPool,
        memory_id: DbId,
    ) -> Result<Option<TimelineEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timeline_events WHERE memory_id = $1");
        sqlx::query_as::<_, TimelineEvent>(&query)
            .bind(memory_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the timeline events of every memory in `memory_ids`.
    pub async fn list_by_memory_ids_in(
        conn: &mut PgConnection,
        memory_ids: &[DbId],
    ) -> Result<Vec<TimelineEvent>, sqlx::Error> {
        if memory_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM timeline_events WHERE memory_id = ANY($1)");
        sqlx::query_as::<_, TimelineEvent>(&query)
            .bind(memory_ids)
            .fetch_all(conn)
            .await
    }
}
