//! Sign-in flow controller.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use ct_core::auth::validation::inline_email_error;
use ct_core::login::{
    LoginAction, LoginCredentials, LoginEvent, LoginState, LoginStateMachine, LoginStep,
};
use ct_core::ports::{AuthGatewayPort, SessionStorePort};
use ct_core::{FieldError, FieldValue, FormError, FormField, FormState, Role, StepOutcome};

/// Drives [`LoginStateMachine`]: credentials, then the terms gate for accounts
/// that have not accepted the current terms yet.
pub struct LoginFlow {
    form: FormState,
    state: LoginState,
    email_error: Option<FormError>,

    auth_gateway: Arc<dyn AuthGatewayPort>,
    session_store: Arc<dyn SessionStorePort>,
}

impl LoginFlow {
    pub fn new(
        auth_gateway: Arc<dyn AuthGatewayPort>,
        session_store: Arc<dyn SessionStorePort>,
    ) -> Self {
        Self {
            form: FormState::default(),
            state: LoginState::initial(),
            email_error: None,
            auth_gateway,
            session_store,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn step(&self) -> LoginStep {
        self.state.step()
    }

    pub fn error(&self) -> Option<&FormError> {
        self.state.error()
    }

    pub fn email_error(&self) -> Option<&FormError> {
        self.email_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_submitting()
    }

    /// Role reported by the account API once signed in.
    pub fn role(&self) -> Option<Role> {
        match self.state {
            LoginState::AwaitingTerms { role, .. } | LoginState::Authenticated { role } => role,
            LoginState::Credentials { .. } => None,
        }
    }

    pub fn update_field(&mut self, field: FormField, value: FieldValue) -> Result<(), FieldError> {
        self.form.update(field, value)?;
        if field == FormField::Email {
            self.email_error = inline_email_error(&self.form.email);
        }
        Ok(())
    }

    pub async fn submit_current_step(&mut self) -> StepOutcome {
        let event = match &self.state {
            LoginState::Credentials { .. } => LoginEvent::SubmitCredentials {
                credentials: LoginCredentials::from_form(&self.form),
            },
            LoginState::AwaitingTerms { .. } => LoginEvent::SubmitTerms {
                accepted: self.form.accept_terms,
            },
            LoginState::Authenticated { .. } => return StepOutcome::Unchanged,
        };

        let before = self.state.step();
        self.dispatch(event).await;

        let outcome = if let Some(error) = self.state.error() {
            StepOutcome::Rejected(error.clone())
        } else if self.state.is_terminal() {
            StepOutcome::Completed
        } else if self.state.step() > before {
            StepOutcome::Advanced
        } else {
            StepOutcome::Unchanged
        };
        debug!(?outcome, step = self.state.step().index(), "login submit finished");
        outcome
    }

    pub async fn reset(&mut self) {
        self.dispatch(LoginEvent::Restart).await;
    }

    async fn dispatch(&mut self, event: LoginEvent) {
        let span = info_span!("usecase.login.dispatch", event = ?event);
        async move {
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = self.state.clone();
                let event_name = format!("{:?}", event);
                let (next, actions) = LoginStateMachine::transition(from.clone(), event);
                info!(from = ?from, to = ?next, event = %event_name, "login state transition");
                self.state = next;
                pending_events.extend(self.execute_actions(actions).await);
            }
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&mut self, actions: Vec<LoginAction>) -> Vec<LoginEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            match action {
                LoginAction::Authenticate { request } => {
                    debug!(remember_me = request.remember_me, "submitting login");
                    let event = match self.auth_gateway.login(&request).await {
                        Ok(outcome) => LoginEvent::RemoteAccepted { outcome },
                        Err(error) => {
                            warn!(%error, "login rejected by account API");
                            LoginEvent::RemoteFailed { error }
                        }
                    };
                    follow_up_events.push(event);
                }
                LoginAction::StoreSession { session } => {
                    if let Err(err) = self.session_store.save(&session).await {
                        warn!(error = %err, "failed to persist session after login");
                    }
                }
                LoginAction::ClearForm => {
                    self.form.clear();
                    self.email_error = None;
                }
            }
        }
        follow_up_events
    }
}
