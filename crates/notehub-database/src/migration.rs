//! Embedded schema migrations for notebooks, folders, files and tasks.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use notehub_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Schema state after a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Migrations compiled into this binary.
    pub embedded: usize,
    /// Migrations recorded as applied in the database.
    pub applied: i64,
    /// Highest applied version, if any.
    pub latest_version: Option<i64>,
}

/// Apply every pending migration and report the resulting schema state.
pub async fn run_migrations(pool: &PgPool) -> Result<SchemaStatus, AppError> {
    let embedded = MIGRATOR.iter().count();
    info!(embedded, "Applying notebook schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Notebook schema migration failed: {e}"),
            e,
        )
    })?;

    let (applied, latest_version) = sqlx::query_as::<_, (i64, Option<i64>)>(
        "SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read schema status", e))?;

    let status = SchemaStatus {
        embedded,
        applied,
        latest_version,
    };
    info!(applied, latest_version = ?latest_version, "Notebook schema is current");
    Ok(status)
}
