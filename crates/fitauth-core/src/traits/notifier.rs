//! Outbound message delivery (email) consumed by the verification flow.

use async_trait::async_trait;

use crate::result::AppResult;

/// A message addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Delivers messages to an address.
///
/// Callers treat delivery as best-effort: an `Err` is logged and dropped,
/// never surfaced to the user whose action triggered the message.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Sends a message.
    async fn send(&self, message: OutboundMessage) -> AppResult<()>;
}
