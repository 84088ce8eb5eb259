//! Registration wizard.
//!
//! Owns the sign-up form and drives [`RegistrationStateMachine`], executing its
//! side effects against the account API, the session store and the notice sink.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use ct_core::auth::validation::inline_email_error;
use ct_core::ports::{AuthGatewayPort, NoticePort, SessionStorePort};
use ct_core::registration::{
    RegistrationAction, RegistrationDetails, RegistrationEvent, RegistrationState,
    RegistrationStateMachine, RegistrationStep,
};
use ct_core::{FieldError, FieldValue, FormError, FormField, FormState, Role, StepOutcome};

/// Form Wizard Controller for the two-step sign-up flow.
///
/// One instance per flow attempt. Methods take `&mut self`, so at most one
/// submission can be in flight; [`RegistrationWizard::is_loading`] reports it.
pub struct RegistrationWizard {
    form: FormState,
    state: RegistrationState,
    email_error: Option<FormError>,

    auth_gateway: Arc<dyn AuthGatewayPort>,
    session_store: Arc<dyn SessionStorePort>,
    notices: Arc<dyn NoticePort>,
}

impl RegistrationWizard {
    pub fn new(
        auth_gateway: Arc<dyn AuthGatewayPort>,
        session_store: Arc<dyn SessionStorePort>,
        notices: Arc<dyn NoticePort>,
    ) -> Self {
        Self {
            form: FormState::default(),
            state: RegistrationState::initial(),
            email_error: None,
            auth_gateway,
            session_store,
            notices,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    pub fn step(&self) -> RegistrationStep {
        self.state.step()
    }

    /// Step-level advisory message.
    pub fn error(&self) -> Option<&FormError> {
        self.state.error()
    }

    /// Live inline message for the email field.
    pub fn email_error(&self) -> Option<&FormError> {
        self.email_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_submitting()
    }

    /// Merge one field; the email field also refreshes its inline message.
    pub fn update_field(&mut self, field: FormField, value: FieldValue) -> Result<(), FieldError> {
        self.form.update(field, value)?;
        if field == FormField::Email {
            self.email_error = inline_email_error(&self.form.email);
        }
        Ok(())
    }

    pub fn select_role(&mut self, role: Role) {
        self.form.role = Some(role);
    }

    /// Whether the "create my account" control is enabled.
    pub fn can_submit_details(&self) -> bool {
        matches!(
            self.state,
            RegistrationState::Details {
                submitting: false,
                ..
            }
        ) && RegistrationDetails::from_form(&self.form).is_submittable()
    }

    /// Validate the current step against the whole form and move on if it passes.
    ///
    /// On the details step a passing form is sent to the account API; the call
    /// completes before this returns.
    pub async fn submit_current_step(&mut self) -> StepOutcome {
        let event = match &self.state {
            RegistrationState::RoleSelect { .. } => RegistrationEvent::SubmitRole {
                role: self.form.role,
            },
            RegistrationState::Details { .. } => RegistrationEvent::SubmitDetails {
                details: RegistrationDetails::from_form(&self.form),
            },
            RegistrationState::Registered { .. } => return StepOutcome::Unchanged,
        };

        let before = self.state.step();
        self.dispatch(event).await;
        let outcome = self.outcome_since(before);
        debug!(?outcome, step = self.state.step().index(), "registration submit finished");
        outcome
    }

    /// Back to the role picker with an empty form.
    pub async fn reset(&mut self) {
        self.dispatch(RegistrationEvent::Restart).await;
    }

    fn outcome_since(&self, before: RegistrationStep) -> StepOutcome {
        if let Some(error) = self.state.error() {
            StepOutcome::Rejected(error.clone())
        } else if self.state.is_terminal() {
            StepOutcome::Completed
        } else if self.state.step() > before {
            StepOutcome::Advanced
        } else {
            StepOutcome::Unchanged
        }
    }

    async fn dispatch(&mut self, event: RegistrationEvent) {
        let span = info_span!("usecase.registration.dispatch", event = ?event);
        async move {
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = self.state.clone();
                let event_name = format!("{:?}", event);
                let (next, actions) = RegistrationStateMachine::transition(from.clone(), event);
                info!(from = ?from, to = ?next, event = %event_name, "registration state transition");
                self.state = next;
                pending_events.extend(self.execute_actions(actions).await);
            }
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&mut self, actions: Vec<RegistrationAction>) -> Vec<RegistrationEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            match action {
                RegistrationAction::SubmitRegistration { request } => {
                    debug!(role = ?request.role, "submitting registration");
                    let event = match self.auth_gateway.register(&request).await {
                        Ok(session) => RegistrationEvent::RemoteAccepted { session },
                        Err(error) => {
                            warn!(%error, "registration rejected by account API");
                            RegistrationEvent::RemoteFailed { error }
                        }
                    };
                    follow_up_events.push(event);
                }
                RegistrationAction::StoreSession { session } => {
                    if let Err(err) = self.session_store.save(&session).await {
                        warn!(error = %err, "failed to persist session after registration");
                    }
                }
                RegistrationAction::Notify { notice } => self.notices.notify(notice),
                RegistrationAction::ClearForm => {
                    self.form.clear();
                    self.email_error = None;
                }
            }
        }
        follow_up_events
    }
}
