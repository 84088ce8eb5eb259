pub mod config;
pub mod http;
pub mod mail;
pub mod notice;
pub mod session_store;

pub use http::HttpAuthGateway;
pub use mail::SmtpMailRelay;
pub use notice::TracingNoticeSink;
pub use session_store::FileSessionStore;
