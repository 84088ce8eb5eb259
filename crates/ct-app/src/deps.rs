//! # Application Dependencies
//!
//! Dependency grouping for constructing controllers and use cases.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - Just parameter grouping

use std::sync::Arc;

use ct_core::ports::{AuthGatewayPort, MailRelayPort, NoticePort, SessionStorePort};

/// All dependencies are required - no defaults, no optional fields.
#[derive(Clone)]
pub struct AppDeps {
    // Remote account API
    pub auth_gateway: Arc<dyn AuthGatewayPort>,

    // Client-side storage of the token / user payload
    pub session_store: Arc<dyn SessionStorePort>,

    // User-visible notices
    pub notices: Arc<dyn NoticePort>,

    // Beta-signup mail relay
    pub mail_relay: Arc<dyn MailRelayPort>,
}
