//! Password reset state machine.

use serde::Serialize;

use crate::auth::validation::{
    is_valid_email, is_valid_password, is_valid_reset_code, passwords_match,
};
use crate::auth::SecretString;
use crate::form::{FormError, Notice};

/// Position in the reset flow, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PasswordResetStep {
    Email = 1,
    Code = 2,
    NewPassword = 3,
}

impl PasswordResetStep {
    pub const MAX_STEP: u8 = 3;

    pub fn index(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PasswordResetState {
    Email { error: Option<FormError> },
    Code { error: Option<FormError> },
    NewPassword { error: Option<FormError> },
}

impl PasswordResetState {
    pub fn initial() -> Self {
        PasswordResetState::Email { error: None }
    }

    pub fn step(&self) -> PasswordResetStep {
        match self {
            PasswordResetState::Email { .. } => PasswordResetStep::Email,
            PasswordResetState::Code { .. } => PasswordResetStep::Code,
            PasswordResetState::NewPassword { .. } => PasswordResetStep::NewPassword,
        }
    }

    pub fn error(&self) -> Option<&FormError> {
        match self {
            PasswordResetState::Email { error }
            | PasswordResetState::Code { error }
            | PasswordResetState::NewPassword { error } => error.as_ref(),
        }
    }

    fn rejected(step: PasswordResetStep, error: FormError) -> Self {
        let error = Some(error);
        match step {
            PasswordResetStep::Email => PasswordResetState::Email { error },
            PasswordResetStep::Code => PasswordResetState::Code { error },
            PasswordResetStep::NewPassword => PasswordResetState::NewPassword { error },
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PasswordResetEvent {
    SubmitEmail {
        email: String,
    },
    SubmitCode {
        code: String,
    },
    SubmitNewPassword {
        password: SecretString,
        confirm_password: SecretString,
    },
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordResetAction {
    Notify { notice: Notice },
    ClearForm,
}

fn validate_email(email: &str) -> Result<(), FormError> {
    if email.trim().is_empty() {
        return Err(FormError::EmailRequired);
    }
    if !is_valid_email(email) {
        return Err(FormError::InvalidEmail);
    }
    Ok(())
}

fn validate_code(code: &str) -> Result<(), FormError> {
    if code.trim().is_empty() {
        return Err(FormError::CodeRequired);
    }
    if !is_valid_reset_code(code) {
        return Err(FormError::code_too_short());
    }
    Ok(())
}

fn validate_new_password(password: &str, confirm_password: &str) -> Result<(), FormError> {
    if password.is_empty() {
        return Err(FormError::NewPasswordRequired);
    }
    if confirm_password.is_empty() {
        return Err(FormError::ConfirmationRequired);
    }
    if !is_valid_password(password) {
        return Err(FormError::password_too_short());
    }
    if !passwords_match(password, confirm_password) {
        return Err(FormError::PasswordMismatch);
    }
    Ok(())
}

/// Pure password reset state machine.
pub struct PasswordResetStateMachine;

impl PasswordResetStateMachine {
    pub fn transition(
        state: PasswordResetState,
        event: PasswordResetEvent,
    ) -> (PasswordResetState, Vec<PasswordResetAction>) {
        match (state, event) {
            (_, PasswordResetEvent::Restart) => (
                PasswordResetState::initial(),
                vec![PasswordResetAction::ClearForm],
            ),
            (PasswordResetState::Email { .. }, PasswordResetEvent::SubmitEmail { email }) => {
                match validate_email(&email) {
                    Err(error) => (
                        PasswordResetState::rejected(PasswordResetStep::Email, error),
                        Vec::new(),
                    ),
                    Ok(()) => (
                        PasswordResetState::Code { error: None },
                        vec![PasswordResetAction::Notify {
                            notice: Notice::ResetCodeSent { email },
                        }],
                    ),
                }
            }
            (PasswordResetState::Code { .. }, PasswordResetEvent::SubmitCode { code }) => {
                match validate_code(&code) {
                    Err(error) => (
                        PasswordResetState::rejected(PasswordResetStep::Code, error),
                        Vec::new(),
                    ),
                    Ok(()) => (
                        PasswordResetState::NewPassword { error: None },
                        vec![PasswordResetAction::Notify {
                            notice: Notice::CodeVerified,
                        }],
                    ),
                }
            }
            (
                PasswordResetState::NewPassword { .. },
                PasswordResetEvent::SubmitNewPassword {
                    password,
                    confirm_password,
                },
            ) => match validate_new_password(&password, &confirm_password) {
                Err(error) => (
                    PasswordResetState::rejected(PasswordResetStep::NewPassword, error),
                    Vec::new(),
                ),
                Ok(()) => (
                    PasswordResetState::initial(),
                    vec![
                        PasswordResetAction::Notify {
                            notice: Notice::PasswordReset,
                        },
                        PasswordResetAction::ClearForm,
                    ],
                ),
            },
            (state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(?state, event = ?_event, "password reset event ignored");
                (state, Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_email(email: &str) -> (PasswordResetState, Vec<PasswordResetAction>) {
        PasswordResetStateMachine::transition(
            PasswordResetState::initial(),
            PasswordResetEvent::SubmitEmail {
                email: email.to_string(),
            },
        )
    }

    fn submit_code(code: &str) -> (PasswordResetState, Vec<PasswordResetAction>) {
        PasswordResetStateMachine::transition(
            PasswordResetState::Code { error: None },
            PasswordResetEvent::SubmitCode {
                code: code.to_string(),
            },
        )
    }

    fn submit_passwords(
        password: &str,
        confirm_password: &str,
    ) -> (PasswordResetState, Vec<PasswordResetAction>) {
        PasswordResetStateMachine::transition(
            PasswordResetState::NewPassword { error: None },
            PasswordResetEvent::SubmitNewPassword {
                password: password.into(),
                confirm_password: confirm_password.into(),
            },
        )
    }

    #[test]
    fn email_step_requires_a_well_formed_address() {
        let (next, actions) = submit_email("   ");
        assert_eq!(next.error(), Some(&FormError::EmailRequired));
        assert!(actions.is_empty());

        let (next, _) = submit_email("nobody@nowhere");
        assert_eq!(next.error(), Some(&FormError::InvalidEmail));
        assert_eq!(next.step(), PasswordResetStep::Email);
    }

    #[test]
    fn valid_email_announces_code_and_advances() {
        let (next, actions) = submit_email("amine@cotalib.com");
        assert_eq!(next, PasswordResetState::Code { error: None });
        assert_eq!(
            actions,
            vec![PasswordResetAction::Notify {
                notice: Notice::ResetCodeSent {
                    email: "amine@cotalib.com".into()
                }
            }]
        );
    }

    #[test]
    fn short_code_is_rejected() {
        let (next, actions) = submit_code("12");
        assert_eq!(next.error(), Some(&FormError::code_too_short()));
        assert_eq!(next.step(), PasswordResetStep::Code);
        assert!(actions.is_empty());

        let (next, _) = submit_code("  ");
        assert_eq!(next.error(), Some(&FormError::CodeRequired));
    }

    #[test]
    fn four_character_code_advances() {
        let (next, _) = submit_code("1234");
        assert_eq!(next, PasswordResetState::NewPassword { error: None });
        assert_eq!(next.step().index(), PasswordResetStep::MAX_STEP);
    }

    #[test]
    fn new_password_rules_in_order() {
        assert_eq!(
            submit_passwords("", "").0.error(),
            Some(&FormError::NewPasswordRequired)
        );
        assert_eq!(
            submit_passwords("abcdef", "").0.error(),
            Some(&FormError::ConfirmationRequired)
        );
        assert_eq!(
            submit_passwords("abc", "abd").0.error(),
            Some(&FormError::password_too_short())
        );
        assert_eq!(
            submit_passwords("abcdef", "abcdeg").0.error(),
            Some(&FormError::PasswordMismatch)
        );
    }

    #[test]
    fn completed_reset_wraps_to_email_and_clears_form() {
        let (next, actions) = submit_passwords("nouveau1", "nouveau1");
        assert_eq!(next, PasswordResetState::initial());
        assert_eq!(
            actions,
            vec![
                PasswordResetAction::Notify {
                    notice: Notice::PasswordReset
                },
                PasswordResetAction::ClearForm,
            ]
        );
    }

    #[test]
    fn out_of_order_submits_are_ignored() {
        let (next, actions) = PasswordResetStateMachine::transition(
            PasswordResetState::initial(),
            PasswordResetEvent::SubmitCode {
                code: "1234".into(),
            },
        );
        assert_eq!(next, PasswordResetState::initial());
        assert!(actions.is_empty());
    }
}
