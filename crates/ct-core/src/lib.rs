//! # ct-core
//!
//! Core domain models and business logic for CoTalib's account flows.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! field validators, the form bag owned by a flow, and one pure state machine
//! per flow (registration, password reset, login).

// Public module exports
pub mod auth;
pub mod config;
pub mod form;
pub mod login;
pub mod password_reset;
pub mod ports;
pub mod registration;

// Re-export commonly used types at the crate root
pub use auth::{Role, SecretString};
pub use config::AppConfig;
pub use form::{FieldError, FieldValue, FormError, FormField, FormState, Notice, StepOutcome};
pub use login::{LoginState, LoginStateMachine};
pub use password_reset::{PasswordResetState, PasswordResetStateMachine};
pub use registration::{RegistrationState, RegistrationStateMachine};
