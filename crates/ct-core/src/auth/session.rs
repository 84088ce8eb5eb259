use serde::{Deserialize, Serialize};

use crate::auth::{Role, SecretString};

/// Projection of the registration form sent to the account API.
#[derive(Debug, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
}

/// Credentials sent to the account API. `email` is already lowercased.
#[derive(Debug, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
}

/// What the client keeps after a successful call: an opaque token and the raw
/// user payload, both optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: Option<String>,
    /// JSON-encoded user object, stored verbatim.
    pub user: Option<String>,
}

impl AuthSession {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

/// Successful login answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub session: AuthSession,
    pub role: Option<Role>,
    pub terms_accepted: bool,
}
