//! Notifier that records deliveries in the log instead of sending mail.

use async_trait::async_trait;
use tracing::info;

use fitauth_core::result::AppResult;
use fitauth_core::traits::{Notifier, OutboundMessage};

/// Logs recipient and subject of each message. The body is never logged.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: OutboundMessage) -> AppResult<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body_len = message.body.len(),
            "Outbound email (log transport)"
        );
        Ok(())
    }
}
