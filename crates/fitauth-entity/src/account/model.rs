//! Account entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fitauth_core::types::{AccountId, GymId};

use super::role::AccountRole;

/// One authenticatable identity. Email is unique across every role.
#[derive(Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Stable identifier assigned at creation.
    pub id: AccountId,
    /// Normalised (trimmed, lower-case) email address.
    pub email: String,
    /// Argon2id PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Actor class. Immutable.
    pub role: AccountRole,
    /// Whether the email has been proven via a one-time code.
    pub verified: bool,
    /// Gym this account belongs to. Always `None` for admins.
    pub tenant_ref: Option<GymId>,
    /// Free-form profile fields captured at registration.
    #[sqlx(json)]
    pub profile: AccountProfile,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("verified", &self.verified)
            .field("tenant_ref", &self.tenant_ref)
            .finish_non_exhaustive()
    }
}

impl Account {
    /// Builds a fresh, unverified account from creation data.
    pub fn create(new: NewAccount, now: DateTime<Utc>) -> Self {
        Self {
            id: AccountId::new(),
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            verified: false,
            tenant_ref: new.tenant_ref,
            profile: new.profile,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, update: &AccountUpdate, now: DateTime<Utc>) {
        if let Some(verified) = update.verified {
            self.verified = verified;
        }
        if let Some(profile) = &update.profile {
            self.profile = profile.clone();
        }
        self.updated_at = now;
    }
}

/// Profile fields supplied at registration. Unknown keys are preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Any further fields the client sent.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Data required to create a new account.
#[derive(Clone)]
pub struct NewAccount {
    /// Normalised email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: AccountRole,
    /// Optional gym scope.
    pub tenant_ref: Option<GymId>,
    /// Profile fields.
    pub profile: AccountProfile,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("tenant_ref", &self.tenant_ref)
            .finish_non_exhaustive()
    }
}

/// Partial update of mutable account fields. Role and email never change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountUpdate {
    /// New verification flag.
    pub verified: Option<bool>,
    /// Replacement profile.
    pub profile: Option<AccountProfile>,
}

impl AccountUpdate {
    /// An update that marks the email as verified.
    pub fn mark_verified() -> Self {
        Self {
            verified: Some(true),
            ..Self::default()
        }
    }
}
