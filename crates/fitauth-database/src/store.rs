//! Storage contracts consumed by the authentication core.
//!
//! Both stores are keyed by normalised email. Implementations must be safe
//! for concurrent use and must make the per-email operations atomic.

use async_trait::async_trait;

use fitauth_core::result::AppResult;
use fitauth_core::types::AccountId;
use fitauth_entity::account::{Account, AccountUpdate};
use fitauth_entity::otp::OtpChallenge;

/// Persistent account lookup and mutation.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an account by its normalised email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Find an account by id.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Insert a new account.
    ///
    /// Fails with `ErrorKind::Conflict` when the email is already taken by
    /// any account, whatever its role.
    async fn insert(&self, account: &Account) -> AppResult<AccountId>;

    /// Apply a partial update. Fails with `ErrorKind::NotFound` if the id is unknown.
    async fn update(&self, id: AccountId, update: &AccountUpdate) -> AppResult<Account>;
}

/// Holder of the single pending verification challenge per email.
#[async_trait]
pub trait OtpStore: Send + Sync + std::fmt::Debug + 'static {
    /// Store `challenge`, replacing any existing one for the same email.
    async fn put(&self, challenge: &OtpChallenge) -> AppResult<()>;

    /// Atomically remove and return the challenge for `email`.
    async fn take(&self, email: &str) -> AppResult<Option<OtpChallenge>>;
}
