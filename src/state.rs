//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use redis::aio::MultiplexedConnection;
use sqlx::PgPool;

use crate::{config::Config, error::AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    /// Redis client used for refresh tokens and rate limiting
    pub redis: redis::Client,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, redis: redis::Client, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner { db, redis, config }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Open a multiplexed Redis connection
    pub async fn redis(&self) -> AppResult<MultiplexedConnection> {
        Ok(self.inner.redis.get_multiplexed_async_connection().await?)
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
