//! Integration tests for the store handle and health reporting.
//!
//! To run these tests, you need a PostgreSQL database and the DATABASE_URL
//! environment variable set. Migrations are applied by the tests.
//!
//! Run with: `DATABASE_URL=postgres://... cargo nextest run -p chirp`

use std::env;
use std::time::Duration;

use chirp::{
    MIGRATOR,
    config::Settings,
    database::Database,
    health::{HealthReporter, HealthStatus},
    prepare_database,
    schema::Entity,
};
use sqlx::postgres::PgPoolOptions;

/// Get a migrated database handle, skipping tests if DATABASE_URL is not set.
async fn get_test_db() -> Option<Database> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    match PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
    {
        Ok(pool) => {
            MIGRATOR.run(&pool).await.expect("Failed to apply migrations");
            Some(Database::new(pool))
        }
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            None
        }
    }
}

#[tokio::test]
async fn test_reachable_store_is_available() {
    let Some(db) = get_test_db().await else {
        return;
    };

    let reporter = HealthReporter::new(db, Duration::from_secs(2));
    assert_eq!(reporter.check().await, HealthStatus::up());
}

#[tokio::test]
async fn test_closed_pool_is_unavailable() {
    let Some(db) = get_test_db().await else {
        return;
    };

    db.pool().close().await;
    let status = HealthReporter::new(db, Duration::from_secs(2)).check().await;
    assert!(!status.available);
    assert!(status.error.is_some());
}

#[tokio::test]
async fn test_prepare_database_migrates_and_pings() {
    let Ok(database_url) = env::var("DATABASE_URL") else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let settings = Settings::from_lookup(|key: &str| match key {
        "DATABASE_URL" => Some(database_url.clone()),
        "DATABASE_MAX_CONNECTIONS" => Some("1".to_string()),
        _ => None,
    })
    .unwrap();

    let db = prepare_database(&settings).await.unwrap();
    for entity in Entity::ALL {
        assert!(db.count(entity).await.unwrap() >= 0, "{entity} not queryable");
    }
}

#[tokio::test]
async fn test_username_must_be_unique() {
    let Some(db) = get_test_db().await else {
        return;
    };
    let name = format!("dup_{}", std::process::id());

    let insert = |email: String| {
        sqlx::query("INSERT INTO users (username, email, password) VALUES ($1, $2, 'x')")
            .bind(name.clone())
            .bind(email)
            .execute(db.pool())
    };

    // Earlier runs of this test may have left the row behind
    let _ = insert(format!("{name}-1@example.com")).await;
    let err = insert(format!("{name}-2@example.com")).await.unwrap_err();
    match err {
        sqlx::Error::Database(e) => assert!(e.is_unique_violation()),
        other => panic!("expected unique violation, got {other:?}"),
    }
}
