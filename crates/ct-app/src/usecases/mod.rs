pub mod beta_signup;
pub mod login;
pub mod password_reset;
pub mod registration;

pub use beta_signup::{BetaSignupError, SubmitBetaSignup};
pub use login::LoginFlow;
pub use password_reset::PasswordResetWizard;
pub use registration::RegistrationWizard;
