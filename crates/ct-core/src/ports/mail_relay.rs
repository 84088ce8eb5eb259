//! Outbound mail relay port
//!
//! Used by the beta-signup endpoint to forward an address to the team inbox.
//! Transport concerns (TLS, retries) belong to the implementation.

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum MailRelayError {
    #[error("invalid mailbox {mailbox:?}: {reason}")]
    InvalidMailbox { mailbox: String, reason: String },
    #[error("failed to build message: {0}")]
    Message(String),
    #[error("mail transport failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait MailRelayPort: Send + Sync {
    /// Forward a beta-signup address.
    async fn send_signup(&self, email: &str) -> Result<(), MailRelayError>;
}
