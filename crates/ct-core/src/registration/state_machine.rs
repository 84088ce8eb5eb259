//! Registration state machine.
//!
//! Defines a pure state transition function for the sign-up flow.

use serde::Serialize;

use crate::auth::validation::{is_valid_email, is_valid_password, passwords_match};
use crate::auth::{AuthSession, RegistrationRequest, Role, SecretString};
use crate::form::{FormError, FormState, Notice};
use crate::ports::GatewayError;

/// Position in the registration flow, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RegistrationStep {
    RoleSelect = 1,
    Details = 2,
}

impl RegistrationStep {
    pub const MAX_STEP: u8 = 2;

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Registration flow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RegistrationState {
    /// "Qui êtes-vous ?" role picker.
    RoleSelect { error: Option<FormError> },
    /// Account details. `submitting` is the loading flag guarding the single
    /// in-flight call to the account API.
    Details {
        role: Role,
        error: Option<FormError>,
        submitting: bool,
    },
    /// The account API accepted the registration.
    Registered { role: Role },
}

impl RegistrationState {
    pub fn initial() -> Self {
        RegistrationState::RoleSelect { error: None }
    }

    /// Terminal `Registered` reports the last step it went through.
    pub fn step(&self) -> RegistrationStep {
        match self {
            RegistrationState::RoleSelect { .. } => RegistrationStep::RoleSelect,
            RegistrationState::Details { .. } | RegistrationState::Registered { .. } => {
                RegistrationStep::Details
            }
        }
    }

    pub fn error(&self) -> Option<&FormError> {
        match self {
            RegistrationState::RoleSelect { error } | RegistrationState::Details { error, .. } => {
                error.as_ref()
            }
            RegistrationState::Registered { .. } => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            RegistrationState::RoleSelect { .. } => None,
            RegistrationState::Details { role, .. } | RegistrationState::Registered { role } => {
                Some(*role)
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(
            self,
            RegistrationState::Details {
                submitting: true,
                ..
            }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RegistrationState::Registered { .. })
    }
}

/// Snapshot of the details step, taken from the form at submit time.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RegistrationDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub accept_terms: bool,
}

impl RegistrationDetails {
    pub fn from_form(form: &FormState) -> Self {
        Self {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            password: form.password.duplicate(),
            confirm_password: form.confirm_password.duplicate(),
            accept_terms: form.accept_terms,
        }
    }

    /// Whether the submit control should be enabled. Advisory only; submit-time
    /// validation stays authoritative.
    pub fn is_submittable(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && !self.email.trim().is_empty()
            && is_valid_email(&self.email)
            && !self.password.trim().is_empty()
            && !self.confirm_password.trim().is_empty()
            && self.accept_terms
    }

    fn into_request(self, role: Role) -> RegistrationRequest {
        RegistrationRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            role,
        }
    }
}

/// Details-step rules, in order. The first violated rule wins.
pub fn validate_details(details: &RegistrationDetails) -> Result<(), FormError> {
    if details.first_name.is_empty()
        || details.last_name.is_empty()
        || details.email.is_empty()
        || details.password.is_empty()
        || details.confirm_password.is_empty()
    {
        return Err(FormError::RequiredFieldsMissing);
    }
    if !is_valid_email(&details.email) {
        return Err(FormError::InvalidEmail);
    }
    if !details.accept_terms {
        return Err(FormError::TermsNotAccepted);
    }
    if !passwords_match(&details.password, &details.confirm_password) {
        return Err(FormError::PasswordMismatch);
    }
    if !is_valid_password(&details.password) {
        return Err(FormError::password_too_short());
    }
    Ok(())
}

/// Events that drive the registration flow.
#[derive(Debug, PartialEq, Eq)]
pub enum RegistrationEvent {
    SubmitRole { role: Option<Role> },
    SubmitDetails { details: RegistrationDetails },
    /// Account API answered 2xx.
    RemoteAccepted { session: AuthSession },
    /// Account API rejected the request or could not be reached.
    RemoteFailed { error: GatewayError },
    /// User navigated back to the start of the flow.
    Restart,
}

/// Side-effects produced by state transitions.
#[derive(Debug, PartialEq, Eq)]
pub enum RegistrationAction {
    SubmitRegistration { request: RegistrationRequest },
    StoreSession { session: AuthSession },
    Notify { notice: Notice },
    ClearForm,
}

/// Pure registration state machine.
pub struct RegistrationStateMachine;

impl RegistrationStateMachine {
    pub fn transition(
        state: RegistrationState,
        event: RegistrationEvent,
    ) -> (RegistrationState, Vec<RegistrationAction>) {
        match (state, event) {
            (_, RegistrationEvent::Restart) => (
                RegistrationState::initial(),
                vec![RegistrationAction::ClearForm],
            ),
            (RegistrationState::RoleSelect { .. }, RegistrationEvent::SubmitRole { role }) => {
                match role {
                    None => (
                        RegistrationState::RoleSelect {
                            error: Some(FormError::RoleRequired),
                        },
                        Vec::new(),
                    ),
                    Some(role) => (
                        RegistrationState::Details {
                            role,
                            error: None,
                            submitting: false,
                        },
                        Vec::new(),
                    ),
                }
            }
            (
                RegistrationState::Details {
                    role,
                    submitting: false,
                    ..
                },
                RegistrationEvent::SubmitDetails { details },
            ) => {
                if let Err(error) = validate_details(&details) {
                    return (
                        RegistrationState::Details {
                            role,
                            error: Some(error),
                            submitting: false,
                        },
                        Vec::new(),
                    );
                }
                (
                    RegistrationState::Details {
                        role,
                        error: None,
                        submitting: true,
                    },
                    vec![RegistrationAction::SubmitRegistration {
                        request: details.into_request(role),
                    }],
                )
            }
            (
                RegistrationState::Details {
                    role,
                    submitting: true,
                    ..
                },
                RegistrationEvent::RemoteAccepted { session },
            ) => {
                let mut actions = Vec::new();
                if !session.is_empty() {
                    actions.push(RegistrationAction::StoreSession { session });
                }
                actions.push(RegistrationAction::ClearForm);
                actions.push(RegistrationAction::Notify {
                    notice: Notice::Registered { role },
                });
                (RegistrationState::Registered { role }, actions)
            }
            (
                RegistrationState::Details {
                    role,
                    submitting: true,
                    ..
                },
                RegistrationEvent::RemoteFailed { error },
            ) => {
                let message = match error {
                    GatewayError::Rejected { .. } => FormError::RegistrationRejected,
                    GatewayError::Transport { .. } => FormError::ConnectionFailed,
                };
                (
                    RegistrationState::Details {
                        role,
                        error: Some(message),
                        submitting: false,
                    },
                    Vec::new(),
                )
            }
            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(?state, event = ?_event, "registration event ignored");
                (state, Vec::new())
            }
        }
    }
}
