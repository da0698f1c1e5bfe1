//! Embedded schema migrations for the PostgreSQL provider.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use mycloud_core::error::{AppError, ErrorKind};

/// Migrations from the workspace `migrations/` directory, compiled in.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every migration the database has not seen yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();
    info!(known, "Applying metadata schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Schema migration failed: {e}"),
            e,
        )
    })?;

    info!("Metadata schema is up to date");
    Ok(())
}
