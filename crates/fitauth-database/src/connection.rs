//! PostgreSQL pool for the account and verification-code tables.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use fitauth_core::config::DatabaseConfig;
use fitauth_core::error::{AppError, ErrorKind};

/// Shared sqlx pool handed to [`crate::AccountRepository`] and [`crate::OtpRepository`].
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Opens the pool and confirms the server answers.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        if !config.is_configured() {
            return Err(AppError::configuration("database.url is empty"));
        }

        info!(
            url = %redact_credentials(&config.url),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Database unreachable: {e}"), e)
            })?;

        let db = Self { pool };
        db.ping().await?;
        Ok(db)
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips a trivial query.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))
    }
}

/// Replaces the userinfo of a connection URL so it can be logged.
fn redact_credentials(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => url.to_string(),
    }
}
