//! Data access for the `drugs` table.
//!
//! Owns the connection pool, embedded migrations, row models and DTOs, and
//! the repository used by the HTTP layer.

pub mod config;
pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub use config::DbConfig;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from explicit configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
