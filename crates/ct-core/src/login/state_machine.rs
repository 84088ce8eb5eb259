//! Login state machine.

use serde::Serialize;

use crate::auth::validation::{is_valid_email, is_valid_password};
use crate::auth::{AuthSession, LoginOutcome, LoginRequest, Role, SecretString};
use crate::form::{FormError, FormState};
use crate::ports::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LoginStep {
    Credentials = 1,
    Terms = 2,
    Dashboard = 3,
}

impl LoginStep {
    pub const MAX_STEP: u8 = 3;

    pub fn index(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LoginState {
    Credentials {
        error: Option<FormError>,
        submitting: bool,
    },
    /// Logged in, but the updated terms of service are not accepted yet.
    AwaitingTerms {
        role: Option<Role>,
        error: Option<FormError>,
    },
    Authenticated { role: Option<Role> },
}

impl LoginState {
    pub fn initial() -> Self {
        LoginState::Credentials {
            error: None,
            submitting: false,
        }
    }

    pub fn step(&self) -> LoginStep {
        match self {
            LoginState::Credentials { .. } => LoginStep::Credentials,
            LoginState::AwaitingTerms { .. } => LoginStep::Terms,
            LoginState::Authenticated { .. } => LoginStep::Dashboard,
        }
    }

    pub fn error(&self) -> Option<&FormError> {
        match self {
            LoginState::Credentials { error, .. } | LoginState::AwaitingTerms { error, .. } => {
                error.as_ref()
            }
            LoginState::Authenticated { .. } => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(
            self,
            LoginState::Credentials {
                submitting: true,
                ..
            }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LoginState::Authenticated { .. })
    }
}

/// Snapshot of the sign-in form.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
}

impl LoginCredentials {
    pub fn from_form(form: &FormState) -> Self {
        Self {
            email: form.email.clone(),
            password: form.password.duplicate(),
            remember_me: form.remember_me,
        }
    }

    fn into_request(self) -> LoginRequest {
        LoginRequest {
            email: self.email.to_lowercase(),
            password: self.password,
            remember_me: self.remember_me,
        }
    }
}

pub fn validate_credentials(credentials: &LoginCredentials) -> Result<(), FormError> {
    if credentials.email.trim().is_empty() {
        return Err(FormError::EmailRequired);
    }
    if !is_valid_email(&credentials.email) {
        return Err(FormError::InvalidEmail);
    }
    if credentials.password.is_empty() {
        return Err(FormError::PasswordRequired);
    }
    if !is_valid_password(&credentials.password) {
        return Err(FormError::password_too_short());
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoginEvent {
    SubmitCredentials { credentials: LoginCredentials },
    RemoteAccepted { outcome: LoginOutcome },
    RemoteFailed { error: GatewayError },
    /// Terms page submit with the current checkbox value.
    SubmitTerms { accepted: bool },
    Restart,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoginAction {
    Authenticate { request: LoginRequest },
    StoreSession { session: AuthSession },
    ClearForm,
}

/// Pure login state machine.
pub struct LoginStateMachine;

impl LoginStateMachine {
    pub fn transition(state: LoginState, event: LoginEvent) -> (LoginState, Vec<LoginAction>) {
        match (state, event) {
            (_, LoginEvent::Restart) => (LoginState::initial(), vec![LoginAction::ClearForm]),
            (
                LoginState::Credentials {
                    submitting: false, ..
                },
                LoginEvent::SubmitCredentials { credentials },
            ) => match validate_credentials(&credentials) {
                Err(error) => (
                    LoginState::Credentials {
                        error: Some(error),
                        submitting: false,
                    },
                    Vec::new(),
                ),
                Ok(()) => (
                    LoginState::Credentials {
                        error: None,
                        submitting: true,
                    },
                    vec![LoginAction::Authenticate {
                        request: credentials.into_request(),
                    }],
                ),
            },
            (
                LoginState::Credentials {
                    submitting: true, ..
                },
                LoginEvent::RemoteAccepted { outcome },
            ) => {
                let mut actions = Vec::new();
                if !outcome.session.is_empty() {
                    actions.push(LoginAction::StoreSession {
                        session: outcome.session,
                    });
                }
                actions.push(LoginAction::ClearForm);
                let next = if outcome.terms_accepted {
                    LoginState::Authenticated { role: outcome.role }
                } else {
                    LoginState::AwaitingTerms {
                        role: outcome.role,
                        error: None,
                    }
                };
                (next, actions)
            }
            (
                LoginState::Credentials {
                    submitting: true, ..
                },
                LoginEvent::RemoteFailed { error },
            ) => {
                let message = match error {
                    GatewayError::Rejected { .. } => FormError::LoginRejected,
                    GatewayError::Transport { .. } => FormError::ConnectionFailed,
                };
                (
                    LoginState::Credentials {
                        error: Some(message),
                        submitting: false,
                    },
                    Vec::new(),
                )
            }
            (LoginState::AwaitingTerms { role, .. }, LoginEvent::SubmitTerms { accepted }) => {
                if accepted {
                    (LoginState::Authenticated { role }, Vec::new())
                } else {
                    (
                        LoginState::AwaitingTerms {
                            role,
                            error: Some(FormError::UpdatedTermsNotAccepted),
                        },
                        Vec::new(),
                    )
                }
            }
            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(?state, event = ?_event, "login event ignored");
                (state, Vec::new())
            }
        }
    }
}
