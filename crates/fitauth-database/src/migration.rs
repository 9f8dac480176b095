//! Embedded schema migrations for `accounts` and `otp_challenges`.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use fitauth_core::error::{AppError, ErrorKind};

/// Migrations compiled in from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies every pending migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let known = MIGRATOR.iter().count();
    info!(known, "Applying database migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!("Database schema is up to date");
    Ok(())
}
