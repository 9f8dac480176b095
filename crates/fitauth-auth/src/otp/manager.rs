//! Issue and check the single pending challenge per email.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use fitauth_core::config::{OtpConfig, ttl_duration};
use fitauth_core::result::AppResult;
use fitauth_core::traits::Clock;
use fitauth_database::store::OtpStore;
use fitauth_entity::otp::OtpChallenge;

use super::generator::generate_code;
use crate::crypto::constant_time_eq;

/// Creates, stores and consumes verification challenges.
///
/// Every check is one-shot: the stored challenge is removed before the code
/// is compared, so a wrong guess burns it.
#[derive(Debug, Clone)]
pub struct OtpManager {
    store: Arc<dyn OtpStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl OtpManager {
    /// Creates a manager over `store` with the configured code lifetime.
    ///
    /// Fails with `ErrorKind::Configuration` when the lifetime is zero or out of range.
    pub fn new(
        store: Arc<dyn OtpStore>,
        clock: Arc<dyn Clock>,
        config: &OtpConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            store,
            clock,
            ttl: ttl_duration("otp.ttl_minutes", config.ttl_minutes)?,
        })
    }

    /// Generates a new code for `email`, replacing any pending one, and returns it.
    pub async fn issue(&self, email: &str) -> AppResult<String> {
        let now = self.clock.now();
        let challenge = OtpChallenge {
            email: email.to_string(),
            code: generate_code(),
            issued_at: now,
            expires_at: now + self.ttl,
        };
        self.store.put(&challenge).await?;
        debug!(email, expires_at = %challenge.expires_at, "Issued verification code");
        Ok(challenge.code)
    }

    /// Consumes the pending challenge for `email` and reports whether `submitted` matched.
    ///
    /// No pending challenge, an expired one, and a wrong code all yield `false`.
    /// The code is compared exactly as submitted.
    pub async fn verify(&self, email: &str, submitted: &str) -> AppResult<bool> {
        let Some(challenge) = self.store.take(email).await? else {
            debug!(email, "No pending verification code");
            return Ok(false);
        };

        if challenge.is_expired(self.clock.now()) {
            warn!(email, "Verification code expired");
            return Ok(false);
        }

        let matched = constant_time_eq(&challenge.code, submitted);
        if !matched {
            warn!(email, "Verification code mismatch");
        }
        Ok(matched)
    }
}
