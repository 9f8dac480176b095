//! Verification challenge repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use fitauth_core::error::{AppError, ErrorKind};
use fitauth_core::result::AppResult;
use fitauth_entity::otp::OtpChallenge;

use crate::store::OtpStore;

/// Repository for pending challenges in PostgreSQL. One row per email.
#[derive(Debug, Clone)]
pub struct OtpRepository {
    pool: PgPool,
}

#[derive(FromRow)]
struct OtpRow {
    email: String,
    code: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<OtpRow> for OtpChallenge {
    fn from(row: OtpRow) -> Self {
        Self {
            email: row.email,
            code: row.code,
            issued_at: row.issued_at,
            expires_at: row.expires_at,
        }
    }
}

impl OtpRepository {
    /// Create a new challenge repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove challenges that expired before `now`. Returns the number removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        sqlx::query("DELETE FROM otp_challenges WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge challenges", e)
            })
    }
}

#[async_trait]
impl OtpStore for OtpRepository {
    async fn put(&self, challenge: &OtpChallenge) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO otp_challenges (email, code, issued_at, expires_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (email) DO UPDATE \
             SET code = EXCLUDED.code, issued_at = EXCLUDED.issued_at, expires_at = EXCLUDED.expires_at",
        )
        .bind(&challenge.email)
        .bind(&challenge.code)
        .bind(challenge.issued_at)
        .bind(challenge.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store challenge", e))?;
        Ok(())
    }

    async fn take(&self, email: &str) -> AppResult<Option<OtpChallenge>> {
        sqlx::query_as::<_, OtpRow>(
            "DELETE FROM otp_challenges WHERE email = $1 \
             RETURNING email, code, issued_at, expires_at",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(OtpChallenge::from))
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to consume challenge", e))
    }
}
