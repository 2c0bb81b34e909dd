//! Sample journal used to populate a fresh database.
//!
//! The dataset lives in `seed/sample_journal.json` and is inserted through
//! [`MemoryRepo::create`], so seeded rows go through the same transaction
//! and validation as API writes.

use keepsake_core::error::CoreError;
use keepsake_core::validation::validate_input;
use sqlx::PgPool;

use crate::models::memory::CreateMemoryInput;
use crate::models::stats::DatasetStats;
use crate::repositories::{LocationRepo, MemoryRepo, StatsRepo};

const SAMPLE_JOURNAL: &str = include_str!("../seed/sample_journal.json");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Sample data is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Parse and validate the bundled sample journal.
pub fn sample_journal() -> Result<Vec<CreateMemoryInput>, SeedError> {
    let entries: Vec<CreateMemoryInput> = serde_json::from_str(SAMPLE_JOURNAL)?;
    for entry in &entries {
        validate_input(entry)?;
    }
    Ok(entries)
}

/// Insert the sample journal.
///
/// With `reset`, every existing memory (with its media and timeline event)
/// and every location left unreferenced is removed first.
pub async fn seed_sample_data(pool: &PgPool, reset: bool) -> Result<DatasetStats, SeedError> {
    let entries = sample_journal()?;

    if reset {
        let memories = MemoryRepo::delete_all(pool).await?;
        let locations = LocationRepo::delete_unreferenced(pool).await?;
        tracing::info!(memories, locations, "Cleared existing journal data");
    }

    for entry in &entries {
        let created = MemoryRepo::create(pool, entry).await?;
        tracing::info!(memory_id = created.memory.id, title = %created.memory.title, "Seeded memory");
    }

    Ok(StatsRepo::dataset_stats(pool).await?)
}
