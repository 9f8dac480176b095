//! JWT claims structure carried by every bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fitauth_core::types::{AccountId, GymId};
use fitauth_entity::account::AccountRole;

/// Subject used for tokens issued to the bootstrap admin credential.
pub const BOOTSTRAP_ADMIN_SUBJECT: &str = "admin";

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account id, or [`BOOTSTRAP_ADMIN_SUBJECT`].
    pub sub: String,
    /// Role at the time of issuance.
    pub role: AccountRole,
    /// Gym the account is scoped to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<GymId>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the account id, or `None` for the bootstrap admin or an unparsable subject.
    pub fn account_id(&self) -> Option<AccountId> {
        self.sub.parse().ok()
    }

    /// Whether this token was issued to the bootstrap admin credential.
    pub fn is_bootstrap_admin(&self) -> bool {
        self.sub == BOOTSTRAP_ADMIN_SUBJECT
    }

    /// Returns the issue time as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Whether the token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}
