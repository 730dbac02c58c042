//! Folder and file schema, embedded from the workspace `migrations/` directory.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{debug, info};

use explorer_core::error::{AppError, ErrorKind};
use explorer_core::result::AppResult;

/// Every bundled schema migration, in version order.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the explorer schema up to date.
///
/// Already-applied versions are skipped by the migrator. Returns how many
/// migrations the binary ships with.
pub async fn run_migrations(pool: &PgPool) -> AppResult<usize> {
    for migration in MIGRATOR.iter() {
        debug!(
            version = migration.version,
            description = %migration.description,
            "Checking schema migration"
        );
    }

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to apply schema migrations", e)
    })?;

    let bundled = MIGRATOR.iter().count();
    info!(bundled, "Folder schema is up to date");
    Ok(bundled)
}
