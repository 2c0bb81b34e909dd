//! Load the bundled sample journal into the database.
//!
//! ```text
//! keepsake-seed [--reset] [--database-url <URL>]
//! ```

use anyhow::Context;
use clap::Parser;
use keepsake_api::telemetry;

#[derive(Debug, Parser)]
#[command(name = "keepsake-seed", version, about = "Seed the journal with sample memories")]
struct Args {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Delete all existing memories (and orphaned locations) before seeding.
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("keepsake_seed=info,keepsake_db=info");

    let args = Args::parse();

    let pool = keepsake_db::create_pool(&args.database_url)
        .await
        .context("failed to connect to database")?;
    keepsake_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let stats = keepsake_db::seed::seed_sample_data(&pool, args.reset)
        .await
        .context("failed to seed sample data")?;

    tracing::info!(
        memories = stats.memories,
        locations = stats.locations,
        media_items = stats.media_items,
        timeline_events = stats.timeline_events,
        reset = args.reset,
        "Sample data loaded",
    );

    Ok(())
}
