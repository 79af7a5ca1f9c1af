//! Shared application state for request handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared application state, cloneable across handlers.
///
/// Holds the application configuration and the PostgreSQL connection pool.
/// `PgPool` is itself an `Arc` around shared pool internals, so cloning the
/// state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
}

impl AppState {
    /// Creates a new application state from the given configuration and pool.
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            pool,
        }
    }
}
