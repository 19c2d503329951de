//! PostgreSQL pool used by every NoteHub repository.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use notehub_core::config::DatabaseConfig;
use notehub_core::error::{AppError, ErrorKind};

/// Shared handle to the notebook database.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `[database]`.
    ///
    /// The first connection is established eagerly so a bad URL or an
    /// unreachable server fails here rather than on the first query.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %config.redacted_url(),
            max_connections = config.max_connections,
            "Opening notebook database pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Cannot reach notebook database at {}", config.redacted_url()),
                    e,
                )
            })?;

        debug!(size = pool.size(), "Notebook database pool ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn into_pool(self) -> PgPool {
        self.pool
    }

    /// Round-trip a trivial query and report the server version.
    pub async fn ping(&self) -> Result<String, AppError> {
        sqlx::query_scalar::<_, String>("SHOW server_version")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Notebook database did not answer", e)
            })
    }
}
