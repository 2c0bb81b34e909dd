//! Repository for the `memories` table and its joined relations.

use std::collections::HashMap;

use keepsake_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::memory::{CreateMemoryInput, Memory, MemoryWithRelations, UpdateMemoryInput};
use crate::repositories::{LocationRepo, MediaRepo, TimelineEventRepo};

/// Column list for the `memories` table.
const COLUMNS: &str = "id, title, description, date, location_id, created_at, updated_at";

/// Provides the transactional write path and the joined read path for memories.
pub struct MemoryRepo;

impl MemoryRepo {
    /// Create a memory together with its location, timeline event and media.
    ///
    /// Everything runs in one transaction: the location (if any) is inserted
    /// first so the memory can reference it, then the memory, its timeline
    /// event and every media item. The joined record is re-read inside the
    /// same transaction before commit. Any failure rolls all rows back.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMemoryInput,
    ) -> Result<MemoryWithRelations, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let location_id = match &input.location {
            Some(location) => Some(LocationRepo::create_in(&mut tx, location).await?.id),
            None => None,
        };

        let insert_query = format!(
            "INSERT INTO memories (title, description, date, location_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let memory = sqlx::query_as::<_, Memory>(&insert_query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
            .bind(location_id)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(event) = &input.timeline_event {
            TimelineEventRepo::create_in(&mut tx, memory.id, &memory.title, memory.date, event)
                .await?;
        }

        for item in &input.media_items {
            MediaRepo::create_in(&mut tx, memory.id, item).await?;
        }

        let created = Self::load_relations(&mut tx, vec![memory])
            .await?
            .pop()
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;

        tracing::debug!(
            memory_id = created.memory.id,
            media_count = created.media_items.len(),
            has_location = created.location.is_some(),
            has_timeline_event = created.timeline_event.is_some(),
            "Memory created",
        );

        Ok(created)
    }

    /// Find a memory by its internal ID, with relations.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MemoryWithRelations>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!("SELECT {COLUMNS} FROM memories WHERE id = $1");
        let memory = sqlx::query_as::<_, Memory>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match memory {
            Some(memory) => Ok(Self::load_relations(&mut conn, vec![memory]).await?.pop()),
            None => Ok(None),
        }
    }

    /// List memories with relations, newest date first.
    ///
    /// With `timeline_only`, only memories that carry a timeline event are
    /// returned.
    pub async fn list(
        pool: &PgPool,
        timeline_only: bool,
    ) -> Result<Vec<MemoryWithRelations>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = if timeline_only {
            format!(
                "SELECT {COLUMNS} FROM memories m \
                 WHERE EXISTS (SELECT 1 FROM timeline_events te WHERE te.memory_id = m.id) \
                 ORDER BY date DESC, id DESC"
            )
        } else {
            format!("SELECT {COLUMNS} FROM memories ORDER BY date DESC, id DESC")
        };
        let memories = sqlx::query_as::<_, Memory>(&query)
            .fetch_all(&mut *conn)
            .await?;

        Self::load_relations(&mut conn, memories).await
    }

    /// Update a memory's scalar fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMemoryInput,
    ) -> Result<Option<MemoryWithRelations>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!(
            "UPDATE memories SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                date = COALESCE($4, date) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let memory = sqlx::query_as::<_, Memory>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
            .fetch_optional(&mut *conn)
            .await?;

        match memory {
            Some(memory) => Ok(Self::load_relations(&mut conn, vec![memory]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Delete a memory. Media and the timeline event go with it via
    /// `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM memories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every memory (and, by cascade, all media and timeline events).
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM memories").execute(pool).await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Attach locations, media and timeline events to `memories`, keeping
    /// their order. Issues one query per relation kind.
    async fn load_relations(
        conn: &mut PgConnection,
        memories: Vec<Memory>,
    ) -> Result<Vec<MemoryWithRelations>, sqlx::Error> {
        if memories.is_empty() {
            return Ok(Vec::new());
        }

        let memory_ids: Vec<DbId> = memories.iter().map(|m| m.id).collect();
        let mut location_ids: Vec<DbId> = memories.iter().filter_map(|m| m.location_id).collect();
        location_ids.sort_unstable();
        location_ids.dedup();

        let locations: HashMap<DbId, _> = LocationRepo::list_by_ids_in(conn, &location_ids)
            .await?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();

        let mut media: HashMap<DbId, Vec<_>> = HashMap::new();
        for item in MediaRepo::list_by_memory_ids_in(conn, &memory_ids).await? {
            media.entry(item.memory_id).or_default().push(item);
        }

        let mut events: HashMap<DbId, _> = TimelineEventRepo::list_by_memory_ids_in(conn, &memory_ids)
            .await?
            .into_iter()
            .map(|e| (e.memory_id, e))
            .collect();

        Ok(memories
            .into_iter()
            .map(|memory| {
                // Several memories may point at the same location row.
                let location = memory
                    .location_id
                    .and_then(|lid| locations.get(&lid).cloned());
                MemoryWithRelations {
                    location,
                    media_items: media.remove(&memory.id).unwrap_or_default(),
                    timeline_event: events.remove(&memory.id),
                    memory,
                }
            })
            .collect())
    }
}
