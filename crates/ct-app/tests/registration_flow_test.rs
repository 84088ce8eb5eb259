use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ct_app::usecase_factory;
use ct_app::AppDeps;
use ct_core::auth::{AuthSession, LoginOutcome, LoginRequest, RegistrationRequest};
use ct_core::ports::{
    AuthGatewayPort, GatewayError, MailRelayError, MailRelayPort, NoticePort, SessionStorePort,
};
use ct_core::registration::{RegistrationState, RegistrationStep};
use ct_core::{FormError, FormField, FormState, Notice, Role, StepOutcome};

#[tokio::test]
async fn registration_flow_test_rejects_each_rule_in_order() {
    let gateway = Arc::new(StubGateway::answering(Ok(AuthSession::default())));
    let (mut wizard, _, _) = build(gateway.clone());

    wizard.select_role(Role::Student);
    assert_eq!(wizard.submit_current_step().await, StepOutcome::Advanced);

    // nothing filled in
    assert_eq!(
        wizard.submit_current_step().await,
        StepOutcome::Rejected(FormError::RequiredFieldsMissing)
    );
    assert!(!wizard.can_submit_details());

    wizard.update_field(FormField::FirstName, "Yasmine".into()).unwrap();
    wizard.update_field(FormField::LastName, "Alaoui".into()).unwrap();
    wizard.update_field(FormField::Email, "yasmine@".into()).unwrap();
    wizard.update_field(FormField::Password, "abc".into()).unwrap();
    wizard.update_field(FormField::ConfirmPassword, "abd".into()).unwrap();
    assert_eq!(
        wizard.submit_current_step().await,
        StepOutcome::Rejected(FormError::InvalidEmail)
    );

    wizard
        .update_field(FormField::Email, "yasmine@cotalib.com".into())
        .unwrap();
    assert_eq!(
        wizard.submit_current_step().await,
        StepOutcome::Rejected(FormError::TermsNotAccepted)
    );

    wizard.update_field(FormField::AcceptTerms, true.into()).unwrap();
    assert_eq!(
        wizard.submit_current_step().await,
        StepOutcome::Rejected(FormError::PasswordMismatch)
    );

    wizard.update_field(FormField::ConfirmPassword, "abc".into()).unwrap();
    assert_eq!(
        wizard.submit_current_step().await,
        StepOutcome::Rejected(FormError::password_too_short())
    );

    assert_eq!(gateway.calls(), 0);
    assert_eq!(wizard.step(), RegistrationStep::Details);
}

#[tokio::test]
async fn registration_flow_test_connection_failure_shows_network_message() {
    let gateway = Arc::new(StubGateway::answering(Err(GatewayError::Transport {
        detail: "connection refused".into(),
    })));
    let (mut wizard, store, notices) = build(gateway.clone());

    fill_valid(&mut wizard, Role::Owner).await;
    let outcome = wizard.submit_current_step().await;

    assert_eq!(outcome, StepOutcome::Rejected(FormError::ConnectionFailed));
    assert_eq!(
        wizard.error().map(ToString::to_string).as_deref(),
        Some("Une erreur réseau s'est produite. Veuillez vérifier votre connexion.")
    );
    assert_eq!(gateway.calls(), 1);
    assert!(!wizard.is_loading());
    assert!(store.saved.lock().unwrap().is_empty());
    assert!(notices.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn registration_flow_test_success_without_token_stores_nothing() {
    let gateway = Arc::new(StubGateway::answering(Ok(AuthSession::default())));
    let (mut wizard, store, notices) = build(gateway.clone());

    fill_valid(&mut wizard, Role::Student).await;
    assert_eq!(wizard.submit_current_step().await, StepOutcome::Completed);

    assert_eq!(
        wizard.state(),
        &RegistrationState::Registered {
            role: Role::Student
        }
    );
    assert!(store.saved.lock().unwrap().is_empty());
    assert_eq!(
        notices.seen.lock().unwrap().as_slice(),
        &[Notice::Registered {
            role: Role::Student
        }]
    );
    assert_eq!(
        gateway.last_request.lock().unwrap().as_ref().map(|r| r.email.clone()),
        Some("yasmine@cotalib.com".to_string())
    );

    // terminal: further submits are inert
    assert_eq!(wizard.submit_current_step().await, StepOutcome::Unchanged);
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn registration_flow_test_failing_session_store_does_not_fail_the_flow() {
    let gateway = Arc::new(StubGateway::answering(Ok(AuthSession {
        token: Some("tok".into()),
        user: None,
    })));
    let deps = AppDeps {
        auth_gateway: gateway,
        session_store: Arc::new(BrokenSessionStore),
        notices: Arc::new(RecordingNotices::default()),
        mail_relay: Arc::new(NoMail),
    };
    let mut wizard = usecase_factory::registration_wizard(&deps);

    fill_valid(&mut wizard, Role::Owner).await;
    assert_eq!(wizard.submit_current_step().await, StepOutcome::Completed);
}

#[tokio::test]
async fn registration_flow_test_reset_from_any_step_yields_defaults() {
    let gateway = Arc::new(StubGateway::answering(Err(GatewayError::Rejected {
        status: 409,
    })));
    let (mut wizard, _, _) = build(gateway);

    wizard.reset().await;
    assert_eq!(wizard.form(), &FormState::default());
    assert_eq!(wizard.step(), RegistrationStep::RoleSelect);

    fill_valid(&mut wizard, Role::Student).await;
    wizard.submit_current_step().await;
    assert_eq!(wizard.error(), Some(&FormError::RegistrationRejected));

    wizard.reset().await;
    assert_eq!(wizard.form(), &FormState::default());
    assert_eq!(wizard.state(), &RegistrationState::initial());
    assert_eq!(wizard.error(), None);
}

async fn fill_valid(wizard: &mut ct_app::usecases::RegistrationWizard, role: Role) {
    wizard.select_role(role);
    assert_eq!(wizard.submit_current_step().await, StepOutcome::Advanced);
    wizard.update_field(FormField::FirstName, "Yasmine".into()).unwrap();
    wizard.update_field(FormField::LastName, "Alaoui".into()).unwrap();
    wizard
        .update_field(FormField::Email, "yasmine@cotalib.com".into())
        .unwrap();
    wizard.update_field(FormField::Password, "secret1".into()).unwrap();
    wizard
        .update_field(FormField::ConfirmPassword, "secret1".into())
        .unwrap();
    wizard.update_field(FormField::AcceptTerms, true.into()).unwrap();
    assert!(wizard.can_submit_details());
}

fn build(
    gateway: Arc<StubGateway>,
) -> (
    ct_app::usecases::RegistrationWizard,
    Arc<MemorySessionStore>,
    Arc<RecordingNotices>,
) {
    let store = Arc::new(MemorySessionStore::default());
    let notices = Arc::new(RecordingNotices::default());
    let deps = AppDeps {
        auth_gateway: gateway,
        session_store: store.clone(),
        notices: notices.clone(),
        mail_relay: Arc::new(NoMail),
    };
    (usecase_factory::registration_wizard(&deps), store, notices)
}

struct StubGateway {
    answer: Result<AuthSession, GatewayError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<RegistrationRequest>>,
}

impl StubGateway {
    fn answering(answer: Result<AuthSession, GatewayError>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthGatewayPort for StubGateway {
    async fn register(&self, request: &RegistrationRequest) -> Result<AuthSession, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(RegistrationRequest {
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            password: request.password.duplicate(),
            role: request.role,
        });
        self.answer.clone()
    }

    async fn login(&self, _request: &LoginRequest) -> Result<LoginOutcome, GatewayError> {
        unreachable!("registration never logs in")
    }
}

#[derive(Default)]
struct MemorySessionStore {
    saved: Mutex<Vec<AuthSession>>,
}

#[async_trait]
impl SessionStorePort for MemorySessionStore {
    async fn save(&self, session: &AuthSession) -> anyhow::Result<()> {
        self.saved.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn load(&self) -> anyhow::Result<Option<AuthSession>> {
        Ok(self.saved.lock().unwrap().last().cloned())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.saved.lock().unwrap().clear();
        Ok(())
    }
}

struct BrokenSessionStore;

#[async_trait]
impl SessionStorePort for BrokenSessionStore {
    async fn save(&self, _session: &AuthSession) -> anyhow::Result<()> {
        anyhow::bail!("storage unavailable")
    }

    async fn load(&self) -> anyhow::Result<Option<AuthSession>> {
        anyhow::bail!("storage unavailable")
    }

    async fn clear(&self) -> anyhow::Result<()> {
        anyhow::bail!("storage unavailable")
    }
}

#[derive(Default)]
struct RecordingNotices {
    seen: Mutex<Vec<Notice>>,
}

impl NoticePort for RecordingNotices {
    fn notify(&self, notice: Notice) {
        self.seen.lock().unwrap().push(notice);
    }
}

struct NoMail;

#[async_trait]
impl MailRelayPort for NoMail {
    async fn send_signup(&self, _email: &str) -> Result<(), MailRelayError> {
        Ok(())
    }
}
