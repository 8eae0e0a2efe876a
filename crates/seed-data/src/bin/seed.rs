//! Seeds the sample users, follows, tweets, likes and edit history.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```
//!
//! Safe to run repeatedly. Migrations are applied by the server, not here.

use chirp::{config::redact_database_url, database::Database, password::CredentialHasher};
use seed_data::{SeedSettings, dataset::Dataset, db::Seeder};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = SeedSettings::from_env()?;

    tracing::info!(
        "Connecting to database at {}",
        redact_database_url(&settings.database_url)
    );

    // One connection is all a run uses.
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(settings.deadline)
        .connect(&settings.database_url)
        .await?;

    let seeder = Seeder::new(Database::new(pool))
        .with_hasher(CredentialHasher::new(settings.hash_cost)?)
        .with_deadline(settings.deadline);

    let report = seeder.run(&Dataset::sample()).await?;

    tracing::info!("Seed completed.");
    tracing::info!("  {report}");

    seeder.db().pool().close().await;

    Ok(())
}
