//! Repository for the `locations` table.

use keepsake_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::location::{CreateLocation, Location};

/// Column list for the `locations` table.
const COLUMNS: &str = "id, name, latitude, longitude, address, created_at, updated_at";

/// Provides insert and lookup operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a location on an existing connection or transaction.
    pub async fn create_in(
        conn: &mut PgConnection,
        input: &CreateLocation,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (name, latitude, longitude, address) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.address)
            .fetch_one(conn)
            .await
    }

    /// Find a location by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every location whose id is in `ids`.
    pub async fn list_by_ids_in(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<Location>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = ANY($1)");
        sqlx::query_as::<_, Location>(&query)
            .bind(ids)
            .fetch_all(conn)
            .await
    }

    /// Remove locations no memory points at any more. Returns the number removed.
    pub async fn delete_unreferenced(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM locations l \
             WHERE NOT EXISTS (SELECT 1 FROM memories m WHERE m.location_id = l.id)",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
