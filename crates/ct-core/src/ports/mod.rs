//! Port interfaces for the application layer
//!
//! Ports define the contract between the form-flow controllers and
//! infrastructure implementations. Controllers only ever talk to these traits,
//! so flows can be driven in tests with synchronous stub collaborators.

pub mod auth_gateway;
pub mod mail_relay;
pub mod notice;
pub mod session_store;

pub use auth_gateway::{AuthGatewayPort, GatewayError};
pub use mail_relay::{MailRelayError, MailRelayPort};
pub use notice::NoticePort;
pub use session_store::SessionStorePort;
