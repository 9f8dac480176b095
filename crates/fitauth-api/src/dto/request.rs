//! Request DTOs.

use serde::{Deserialize, Serialize};

use fitauth_auth::{Credentials, Registration};
use fitauth_core::types::GymId;
use fitauth_entity::account::{AccountProfile, AccountRole};

/// Self-registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role. `admin` is refused.
    pub role: AccountRole,
    /// Gym the account belongs to.
    #[serde(default)]
    pub gym_id: Option<GymId>,
    /// Profile fields.
    #[serde(default)]
    pub profile: AccountProfile,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            role: req.role,
            tenant_ref: req.gym_id,
            profile: req.profile,
        }
    }
}

/// Email verification request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    /// Email the code was sent to.
    pub email: String,
    /// The six-digit code.
    pub code: String,
}

/// Verification resend request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendCodeRequest {
    /// Email to resend to.
    pub email: String,
}

/// Login request body, shared by the app and dashboard routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Portal role the user signs in as. Only checked on the dashboard.
    #[serde(default)]
    pub role: Option<AccountRole>,
}

impl From<LoginRequest> for Credentials {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            expected_role: req.role,
        }
    }
}
