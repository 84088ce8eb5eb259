//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide the serde mapping used by the loader in `ct-infra`
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//! - No default value calculation (defaults live with the loader)

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Base URL of the account API (registration / login).
    pub api_base_url: String,

    /// Address the beta-signup relay listens on, e.g. `127.0.0.1:3000`.
    pub relay_bind_addr: String,

    /// Timeout applied to each outbound account API call.
    pub request_timeout_secs: u64,

    /// Where the client keeps the auth token and user payload.
    pub session_store_path: PathBuf,

    /// Mail relay used by the beta-signup endpoint.
    pub smtp: SmtpConfig,
}

/// SMTP collaborator settings, read from the `SMTP_*` environment.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
    pub to: String,
}

impl SmtpConfig {
    /// Port 465 speaks TLS from the first byte; other ports upgrade with STARTTLS.
    pub fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &"[REDACTED]")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}
