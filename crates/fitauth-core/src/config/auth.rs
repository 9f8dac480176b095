//! Authentication configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

/// Authentication and credential configuration.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Must be non-empty.
    #[serde(default = "empty_secret", deserialize_with = "deserialize_secret")]
    pub jwt_secret: SecretString,
    /// Token TTL for the registered-user (mobile app) login, in minutes.
    #[serde(default = "default_app_ttl")]
    pub app_token_ttl_minutes: u64,
    /// Token TTL for the web dashboard login, in minutes.
    #[serde(default = "default_dashboard_ttl")]
    pub dashboard_token_ttl_minutes: u64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Per-role switch: refuse login until the email is verified.
    #[serde(default)]
    pub require_verified: RequireVerified,
    /// Optional credential that logs in as admin without an account row.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

/// Whether each actor class must have a verified email before login succeeds.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RequireVerified {
    /// Platform admins.
    #[serde(default)]
    pub admin: bool,
    /// Gym managers.
    #[serde(default)]
    pub manager: bool,
    /// Trainers.
    #[serde(default)]
    pub trainer: bool,
    /// Trainees (mobile app users).
    #[serde(default)]
    pub trainee: bool,
}

/// Credential pair accepted as the bootstrap admin. The role is always admin.
#[derive(Debug, Deserialize)]
pub struct BootstrapAdminConfig {
    /// Login email.
    pub email: String,
    /// Plaintext password, compared in constant time.
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,
}

impl AuthConfig {
    /// Builds a config around the given signing secret with every other value defaulted.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::from(secret.into()),
            app_token_ttl_minutes: default_app_ttl(),
            dashboard_token_ttl_minutes: default_dashboard_ttl(),
            password_min_length: default_password_min(),
            require_verified: RequireVerified::default(),
            bootstrap_admin: None,
        }
    }

    /// Whether a usable signing secret is present.
    pub fn has_secret(&self) -> bool {
        !self.jwt_secret.expose_secret().trim().is_empty()
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(SecretString::from(raw))
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_app_ttl() -> u64 {
    60
}

fn default_dashboard_ttl() -> u64 {
    24 * 60
}

fn default_password_min() -> usize {
    8
}
