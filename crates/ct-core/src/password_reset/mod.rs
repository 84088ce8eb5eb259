//! Password reset domain module.
//!
//! Three linear steps: email, verification code, new password. The code is
//! not checked against any backend; any input of sufficient length passes.

pub mod state_machine;

pub use state_machine::{
    PasswordResetAction, PasswordResetEvent, PasswordResetState, PasswordResetStateMachine,
    PasswordResetStep,
};
