//! SMTP implementation of [`MailRelayPort`] built on lettre.
//!
//! A transport is built per send from the stored settings, so a broken SMTP
//! configuration surfaces as a failed request rather than a failed startup.
//! Certificate verification is disabled on both TLS modes.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, debug_span, Instrument};

use ct_core::config::SmtpConfig;
use ct_core::ports::{MailRelayError, MailRelayPort};

pub const SIGNUP_SUBJECT: &str = "New Beta Signup";
pub const SIGNUP_BODY_PREFIX: &str = "New signup email: ";

pub struct SmtpMailRelay {
    settings: SmtpConfig,
}

impl SmtpMailRelay {
    pub fn new(settings: SmtpConfig) -> Self {
        Self { settings }
    }

    fn mailbox(raw: &str) -> Result<Mailbox, MailRelayError> {
        raw.parse::<Mailbox>()
            .map_err(|e| MailRelayError::InvalidMailbox {
                mailbox: raw.to_string(),
                reason: e.to_string(),
            })
    }

    fn build_message(&self, email: &str) -> Result<Message, MailRelayError> {
        Message::builder()
            .from(Self::mailbox(&self.settings.from)?)
            .to(Self::mailbox(&self.settings.to)?)
            .subject(SIGNUP_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(format!("{SIGNUP_BODY_PREFIX}{email}"))
            .map_err(|e| MailRelayError::Message(e.to_string()))
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailRelayError> {
        let tls_parameters = TlsParameters::builder(self.settings.host.clone())
            .dangerous_accept_invalid_certs(true)
            .build()
            .map_err(|e| MailRelayError::Transport(e.to_string()))?;
        let tls = if self.settings.implicit_tls() {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.settings.host.as_str())
                .port(self.settings.port)
                .tls(tls)
                .credentials(Credentials::new(
                    self.settings.user.clone(),
                    self.settings.pass.clone(),
                ))
                .build(),
        )
    }
}

#[async_trait]
impl MailRelayPort for SmtpMailRelay {
    async fn send_signup(&self, email: &str) -> Result<(), MailRelayError> {
        let span = debug_span!(
            "infra.smtp.send_signup",
            host = %self.settings.host,
            port = self.settings.port
        );
        async {
            let message = self.build_message(email)?;
            let transport = self.build_transport()?;
            let response = transport
                .send(message)
                .await
                .map_err(|e| MailRelayError::Transport(e.to_string()))?;
            debug!(code = %response.code(), "signup mail accepted by SMTP server");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
