//! Login domain module.
//!
//! Credentials are checked locally, then sent to the account API. A user whose
//! account predates the current terms must accept them before reaching the
//! dashboard.

pub mod state_machine;

pub use state_machine::{
    LoginAction, LoginCredentials, LoginEvent, LoginState, LoginStateMachine, LoginStep,
};
