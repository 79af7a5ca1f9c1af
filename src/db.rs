//! PostgreSQL pool construction and the connectivity probe.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Build the connection pool from configuration.
///
/// The pool is lazy: no connection is dialed until the first acquisition, so
/// the server starts (and serves the frontend) even when the database is
/// unreachable. Acquisition is bounded by the configured timeout.
pub fn create_pool(config: &DatabaseConfig) -> PgPool {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(&config.password);

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect_lazy_with(options)
}

/// Ask the database for its current time.
///
/// One pooled connection is acquired per call and returned to the pool on
/// every exit path, including acquisition timeouts and query errors.
pub async fn fetch_server_time(pool: &PgPool) -> Result<DateTime<Utc>, sqlx::Error> {
    sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
        .fetch_one(pool)
        .await
}
