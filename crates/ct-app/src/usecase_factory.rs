//! Factory functions for creating controllers and use cases with AppDeps

use crate::deps::AppDeps;
use crate::usecases::{LoginFlow, PasswordResetWizard, RegistrationWizard, SubmitBetaSignup};

pub fn registration_wizard(deps: &AppDeps) -> RegistrationWizard {
    RegistrationWizard::new(
        deps.auth_gateway.clone(),
        deps.session_store.clone(),
        deps.notices.clone(),
    )
}

pub fn password_reset_wizard(deps: &AppDeps) -> PasswordResetWizard {
    PasswordResetWizard::new(deps.notices.clone())
}

pub fn login_flow(deps: &AppDeps) -> LoginFlow {
    LoginFlow::new(deps.auth_gateway.clone(), deps.session_store.clone())
}

pub fn submit_beta_signup(deps: &AppDeps) -> SubmitBetaSignup {
    SubmitBetaSignup::new(deps.mail_relay.clone())
}
