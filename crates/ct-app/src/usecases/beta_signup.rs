use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use ct_core::ports::{MailRelayError, MailRelayPort};

#[derive(Debug, thiserror::Error)]
pub enum BetaSignupError {
    #[error("email is required")]
    MissingEmail,
    #[error("failed to relay beta signup: {0}")]
    Delivery(#[from] MailRelayError),
}

/// Forward a beta-signup address to the team inbox.
pub struct SubmitBetaSignup {
    mail_relay: Arc<dyn MailRelayPort>,
}

impl SubmitBetaSignup {
    pub fn new(mail_relay: Arc<dyn MailRelayPort>) -> Self {
        Self { mail_relay }
    }

    /// `None` and the empty string are both a missing email. Whitespace-only
    /// input is forwarded as-is.
    pub async fn execute(&self, email: Option<&str>) -> Result<(), BetaSignupError> {
        let span = info_span!("usecase.beta_signup.execute");
        async move {
            let email = email
                .filter(|email| !email.is_empty())
                .ok_or(BetaSignupError::MissingEmail)?;
            self.mail_relay.send_signup(email).await?;
            info!("beta signup relayed");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
