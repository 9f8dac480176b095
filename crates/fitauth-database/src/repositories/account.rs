//! Account repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use fitauth_core::error::{AppError, ErrorKind};
use fitauth_core::result::AppResult;
use fitauth_core::types::AccountId;
use fitauth_entity::account::{Account, AccountUpdate};

use crate::store::AccountStore;

/// Unique constraint on `accounts.email`.
const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

/// Repository for account persistence in PostgreSQL.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
            })
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    async fn insert(&self, account: &Account) -> AppResult<AccountId> {
        sqlx::query_scalar::<_, AccountId>(
            "INSERT INTO accounts \
                (id, email, password_hash, role, verified, tenant_ref, profile, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role)
        .bind(account.verified)
        .bind(account.tenant_ref)
        .bind(Json(&account.profile))
        .bind(account.created_at)
        .bind(account.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) =>
            {
                AppError::conflict("Email already registered")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert account", e),
        })
    }

    async fn update(&self, id: AccountId, update: &AccountUpdate) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET verified = COALESCE($2, verified), \
                                 profile = COALESCE($3, profile), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(update.verified)
        .bind(update.profile.as_ref().map(Json))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update account", e))?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }
}
