//! Password reset wizard.

use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};

use ct_core::auth::validation::inline_email_error;
use ct_core::password_reset::{
    PasswordResetAction, PasswordResetEvent, PasswordResetState, PasswordResetStateMachine,
    PasswordResetStep,
};
use ct_core::ports::NoticePort;
use ct_core::{FieldError, FieldValue, FormError, FormField, FormState, StepOutcome};

/// Form Wizard Controller for the three-step reset flow.
///
/// No remote collaborator is involved: every step is validated locally and
/// success is announced through the notice sink.
pub struct PasswordResetWizard {
    form: FormState,
    state: PasswordResetState,
    email_error: Option<FormError>,

    notices: Arc<dyn NoticePort>,
}

impl PasswordResetWizard {
    pub fn new(notices: Arc<dyn NoticePort>) -> Self {
        Self {
            form: FormState::default(),
            state: PasswordResetState::initial(),
            email_error: None,
            notices,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> &PasswordResetState {
        &self.state
    }

    pub fn step(&self) -> PasswordResetStep {
        self.state.step()
    }

    pub fn error(&self) -> Option<&FormError> {
        self.state.error()
    }

    pub fn email_error(&self) -> Option<&FormError> {
        self.email_error.as_ref()
    }

    /// Always false; kept so every flow exposes the same surface.
    pub fn is_loading(&self) -> bool {
        false
    }

    pub fn update_field(&mut self, field: FormField, value: FieldValue) -> Result<(), FieldError> {
        self.form.update(field, value)?;
        if field == FormField::Email {
            self.email_error = inline_email_error(&self.form.email);
        }
        Ok(())
    }

    /// Validate the fields of the current step. A successful last step wraps
    /// back to the email step with an empty form and reports `Completed`.
    pub async fn submit_current_step(&mut self) -> StepOutcome {
        let event = match &self.state {
            PasswordResetState::Email { .. } => PasswordResetEvent::SubmitEmail {
                email: self.form.email.clone(),
            },
            PasswordResetState::Code { .. } => PasswordResetEvent::SubmitCode {
                code: self.form.code.clone(),
            },
            PasswordResetState::NewPassword { .. } => PasswordResetEvent::SubmitNewPassword {
                password: self.form.password.duplicate(),
                confirm_password: self.form.confirm_password.duplicate(),
            },
        };

        let before = self.state.step();
        self.dispatch(event).await;

        let after = self.state.step();
        let outcome = match self.state.error() {
            Some(error) => StepOutcome::Rejected(error.clone()),
            None if before == PasswordResetStep::NewPassword && after == PasswordResetStep::Email => {
                StepOutcome::Completed
            }
            None if after > before => StepOutcome::Advanced,
            None => StepOutcome::Unchanged,
        };
        debug!(?outcome, step = after.index(), "password reset submit finished");
        outcome
    }

    pub async fn reset(&mut self) {
        self.dispatch(PasswordResetEvent::Restart).await;
    }

    async fn dispatch(&mut self, event: PasswordResetEvent) {
        let span = info_span!("usecase.password_reset.dispatch", event = ?event);
        async move {
            let from = self.state.clone();
            let event_name = format!("{:?}", event);
            let (next, actions) = PasswordResetStateMachine::transition(from.clone(), event);
            info!(from = ?from, to = ?next, event = %event_name, "password reset state transition");
            self.state = next;
            self.execute_actions(actions);
        }
        .instrument(span)
        .await
    }

    fn execute_actions(&mut self, actions: Vec<PasswordResetAction>) {
        for action in actions {
            match action {
                PasswordResetAction::Notify { notice } => self.notices.notify(notice),
                PasswordResetAction::ClearForm => {
                    self.form.clear();
                    self.email_error = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ct_core::Notice;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotices {
        seen: Mutex<Vec<Notice>>,
    }

    impl NoticePort for RecordingNotices {
        fn notify(&self, notice: Notice) {
            self.seen.lock().unwrap().push(notice);
        }
    }

    fn wizard() -> (PasswordResetWizard, Arc<RecordingNotices>) {
        let notices = Arc::new(RecordingNotices::default());
        (PasswordResetWizard::new(notices.clone()), notices)
    }

    #[tokio::test]
    async fn empty_email_is_rejected_on_first_step() {
        let (mut wizard, notices) = wizard();

        let outcome = wizard.submit_current_step().await;

        assert_eq!(outcome, StepOutcome::Rejected(FormError::EmailRequired));
        assert_eq!(wizard.step(), PasswordResetStep::Email);
        assert!(notices.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn code_step_only_sees_the_code_field() {
        let (mut wizard, _) = wizard();
        wizard.update_field(FormField::Email, "amine@cotalib.com".into()).unwrap();
        assert_eq!(wizard.submit_current_step().await, StepOutcome::Advanced);

        // a mismatched password pair must not block the code step
        wizard.update_field(FormField::Password, "abc".into()).unwrap();
        wizard.update_field(FormField::ConfirmPassword, "xyz".into()).unwrap();
        wizard.update_field(FormField::Code, "987".into()).unwrap();
        assert_eq!(
            wizard.submit_current_step().await,
            StepOutcome::Rejected(FormError::code_too_short())
        );

        wizard.update_field(FormField::Code, "9876".into()).unwrap();
        assert_eq!(wizard.submit_current_step().await, StepOutcome::Advanced);
        assert_eq!(wizard.step(), PasswordResetStep::NewPassword);
    }

    #[tokio::test]
    async fn reset_discards_progress() {
        let (mut wizard, _) = wizard();
        wizard.update_field(FormField::Email, "amine@cotalib.com".into()).unwrap();
        wizard.submit_current_step().await;

        wizard.reset().await;

        assert_eq!(wizard.step(), PasswordResetStep::Email);
        assert_eq!(wizard.form(), &FormState::default());
        assert_eq!(wizard.error(), None);
    }
}
