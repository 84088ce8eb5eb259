//! Authentication domain: roles, credentials and the payloads exchanged with
//! the remote account API.

pub mod role;
pub mod secret;
pub mod session;
pub mod validation;

pub use role::Role;
pub use secret::SecretString;
pub use session::{AuthSession, LoginOutcome, LoginRequest, RegistrationRequest};
