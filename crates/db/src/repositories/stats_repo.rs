//! Aggregate counts across the journal tables.

use sqlx::PgPool;

use crate::models::stats::DatasetStats;

pub struct StatsRepo;

impl StatsRepo {
    /// Count rows in every journal table in one round trip.
    pub async fn dataset_stats(pool: &PgPool) -> Result<DatasetStats, sqlx::Error> {
        sqlx::query_as::<_, DatasetStats>(
            "SELECT \
                (SELECT COUNT(*) FROM memories) AS memories, \
                (SELECT COUNT(*) FROM locations) AS locations, \
                (SELECT COUNT(*) FROM media) AS media_items, \
                (SELECT COUNT(*) FROM timeline_events) AS timeline_events",
        )
        .fetch_one(pool)
        .await
    }
}
