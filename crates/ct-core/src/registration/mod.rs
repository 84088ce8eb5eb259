//! Registration domain module.
//!
//! Two steps: pick a role, then fill in the account details and submit them
//! to the account API.

pub mod state_machine;

pub use state_machine::{
    RegistrationAction, RegistrationDetails, RegistrationEvent, RegistrationState,
    RegistrationStateMachine, RegistrationStep,
};
