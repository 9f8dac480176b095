//! In-memory challenge store backed by `DashMap`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use fitauth_core::result::AppResult;
use fitauth_entity::otp::OtpChallenge;

use crate::store::OtpStore;

/// Challenge store keyed by email.
#[derive(Debug, Clone, Default)]
pub struct MemoryOtpStore {
    challenges: Arc<DashMap<String, OtpChallenge>>,
}

impl MemoryOtpStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop challenges that expired before `now`. Returns the number removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.challenges.len();
        self.challenges.retain(|_, c| !c.is_expired(now));
        let removed = before.saturating_sub(self.challenges.len());
        debug!(removed, "Purged expired verification challenges");
        removed
    }

    /// Whether a challenge is pending for `email`.
    pub fn contains(&self, email: &str) -> bool {
        self.challenges.contains_key(email)
    }
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn put(&self, challenge: &OtpChallenge) -> AppResult<()> {
        self.challenges
            .insert(challenge.email.clone(), challenge.clone());
        Ok(())
    }

    async fn take(&self, email: &str) -> AppResult<Option<OtpChallenge>> {
        Ok(self.challenges.remove(email).map(|(_, c)| c))
    }
}
