//! # Dependency Injection
//!
//! The only place that depends on `ct-infra` and `ct-app` at once. Assembly
//! only: every adapter is handed to `AppDeps` behind its port trait.

use std::sync::Arc;
use std::time::Duration;

use ct_app::AppDeps;
use ct_core::config::AppConfig;
use ct_infra::{FileSessionStore, HttpAuthGateway, SmtpMailRelay, TracingNoticeSink};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),
}

pub fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    let auth_gateway = HttpAuthGateway::new(
        config.api_base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
    .map_err(|e| WiringError::HttpClient(e.to_string()))?;

    Ok(AppDeps {
        auth_gateway: Arc::new(auth_gateway),
        session_store: Arc::new(FileSessionStore::new(config.session_store_path.clone())),
        notices: Arc::new(TracingNoticeSink),
        mail_relay: Arc::new(SmtpMailRelay::new(config.smtp.clone())),
    })
}
