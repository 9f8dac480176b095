//! Notifier that keeps sent messages in memory, for tests and local runs.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use fitauth_core::error::AppError;
use fitauth_core::result::AppResult;
use fitauth_core::traits::{Notifier, OutboundMessage};

/// Collects every message it is asked to send.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl MemoryNotifier {
    /// Creates an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far.
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn send(&self, message: OutboundMessage) -> AppResult<()> {
        self.sent
            .lock()
            .map_err(|_| AppError::internal("Outbox lock poisoned"))?
            .push(message);
        Ok(())
    }
}
