//! # ZoškaGram DB
//!
//! PostgreSQL connection pool for the profile store.
//!
//! # Example
//!
//! ```ignore
//! use zoskagram_db::init_db_pool;
//!
//! let pool = init_db_pool().await?;
//! ```

use std::{env, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL` and applies
/// pending migrations.
///
/// Pool size comes from `DATABASE_MAX_CONNECTIONS` (default: 10). The acquire
/// timeout is kept short so that a saturated pool surfaces as an error rather
/// than a stalled request.
///
/// # Errors
///
/// Fails if `DATABASE_URL` is unset, the database is unreachable, or a
/// migration fails.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!(max_connections, "Database pool ready");

    Ok(pool)
}
