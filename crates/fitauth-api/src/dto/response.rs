//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fitauth_auth::{Claims, IssuedToken};
use fitauth_core::types::{AccountId, GymId};
use fitauth_entity::account::{Account, AccountProfile, AccountRole};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Generic message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The message.
    pub message: String,
}

/// Registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The new account's id.
    pub account_id: AccountId,
    /// Always `false` right after registration.
    pub verified: bool,
}

/// Verification outcome. `false` covers wrong, expired and unknown alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailResponse {
    /// Whether the account is now verified.
    pub verified: bool,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed bearer token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// Role carried in the token.
    pub role: AccountRole,
    /// Gym carried in the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gym_id: Option<GymId>,
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            expires_at: issued.expires_at(),
            role: issued.claims.role,
            gym_id: issued.claims.tenant,
            access_token: issued.token,
            token_type: "Bearer".to_string(),
        }
    }
}

/// Stored account summary. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: AccountId,
    /// Email.
    pub email: String,
    /// Role.
    pub role: AccountRole,
    /// Whether the email has been verified.
    pub verified: bool,
    /// Gym scope.
    pub gym_id: Option<GymId>,
    /// Profile fields.
    pub profile: AccountProfile,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role,
            verified: account.verified,
            gym_id: account.tenant_ref,
            profile: account.profile,
            created_at: account.created_at,
        }
    }
}

/// Identity behind the presented token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// Token subject.
    pub subject: String,
    /// Role.
    pub role: AccountRole,
    /// Gym scope.
    pub gym_id: Option<GymId>,
    /// Issued-at time.
    pub issued_at: DateTime<Utc>,
    /// Expiration time.
    pub expires_at: DateTime<Utc>,
    /// Stored account; absent for the bootstrap admin.
    pub account: Option<AccountResponse>,
}

impl IdentityResponse {
    /// Builds the response from validated claims and the optional stored account.
    pub fn new(claims: &Claims, account: Option<Account>) -> Self {
        Self {
            subject: claims.sub.clone(),
            role: claims.role,
            gym_id: claims.tenant,
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
            account: account.map(AccountResponse::from),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Server version.
    pub version: String,
}
