//! Database migration command.

use clap::Args;

use crate::output;
use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_database::DatabasePool;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Only check database connectivity, do not apply migrations
    #[arg(long)]
    pub check: bool,
}

/// Apply all pending migrations.
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;

    if args.check {
        let version = db.ping().await?;
        output::print_success(&format!("Database is reachable (PostgreSQL {version})."));
        return Ok(());
    }

    let status = notehub_database::migration::run_migrations(db.pool()).await?;
    output::print_success("All migrations applied successfully.");
    output::print_kv("Embedded", &status.embedded.to_string());
    output::print_kv("Applied", &status.applied.to_string());
    if let Some(version) = status.latest_version {
        output::print_kv("Latest version", &version.to_string());
    }
    Ok(())
}
