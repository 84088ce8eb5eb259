//! Remote Submission Adapter contract.

use async_trait::async_trait;

use crate::auth::{AuthSession, LoginOutcome, LoginRequest, RegistrationRequest};

/// Why a remote submission failed. The detail is kept for logs only; flows map
/// each kind to one fixed user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The API answered with a non-2xx status.
    #[error("remote rejected the request with status {status}")]
    Rejected { status: u16 },
    /// The request never produced a usable answer.
    #[error("transport failure: {detail}")]
    Transport { detail: String },
}

/// One outbound call per user-initiated submit. Implementations must not retry.
#[async_trait]
pub trait AuthGatewayPort: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> Result<AuthSession, GatewayError>;

    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, GatewayError>;
}
