use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Shared application state, built once in `main` and injected into
/// handlers through axum's `State`. The pool connects lazily so the
/// process starts (and reports a degraded `/health`) when the database
/// is unreachable.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

pub fn pool_from_env(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost:5432/hrm".to_string());

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect_lazy(&url)
}

/// Pings the pool to confirm connectivity.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
