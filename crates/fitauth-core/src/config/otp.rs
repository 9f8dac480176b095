//! One-time registration code configuration.

use serde::{Deserialize, Serialize};

/// Settings for email verification codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpConfig {
    /// Lifetime of an issued code in minutes.
    #[serde(default = "default_ttl")]
    pub ttl_minutes: u64,
    /// Subject line of the verification email.
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl(),
            subject: default_subject(),
        }
    }
}

fn default_ttl() -> u64 {
    10
}

fn default_subject() -> String {
    "Your verification code".to_string()
}
