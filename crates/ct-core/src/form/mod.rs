//! Form bag owned by a flow.
//!
//! A flow controller owns exactly one [`FormState`] for the lifetime of an
//! attempt. Fields are merged one at a time as the user types and the whole
//! bag is reset to [`FormState::default`] when the flow restarts.

mod error;
mod notice;

pub use error::{FieldError, FormError};
pub use notice::Notice;

use serde::{Deserialize, Serialize};

use crate::auth::{Role, SecretString};

/// Addressable input of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
    Code,
    AcceptTerms,
    RememberMe,
}

impl FormField {
    /// Whether the input is a checkbox rather than a text box.
    pub fn is_flag(self) -> bool {
        matches!(self, FormField::AcceptTerms | FormField::RememberMe)
    }
}

/// Value carried by a change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Field values of an in-progress flow.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub code: String,
    pub accept_terms: bool,
    pub remember_me: bool,
    pub role: Option<Role>,
}

impl FormState {
    /// Merge one field. Text values cannot be written into checkboxes and vice versa.
    pub fn update(&mut self, field: FormField, value: FieldValue) -> Result<(), FieldError> {
        match (field, value) {
            (FormField::FirstName, FieldValue::Text(v)) => self.first_name = v,
            (FormField::LastName, FieldValue::Text(v)) => self.last_name = v,
            (FormField::Email, FieldValue::Text(v)) => self.email = v,
            (FormField::Password, FieldValue::Text(v)) => self.password = SecretString::new(v),
            (FormField::ConfirmPassword, FieldValue::Text(v)) => {
                self.confirm_password = SecretString::new(v)
            }
            (FormField::Code, FieldValue::Text(v)) => self.code = v,
            (FormField::AcceptTerms, FieldValue::Flag(v)) => self.accept_terms = v,
            (FormField::RememberMe, FieldValue::Flag(v)) => self.remember_me = v,
            (field, FieldValue::Text(_)) => return Err(FieldError::ExpectedFlag { field }),
            (field, FieldValue::Flag(_)) => return Err(FieldError::ExpectedText { field }),
        }
        Ok(())
    }

    /// Back to the documented empty defaults.
    pub fn clear(&mut self) {
        *self = FormState::default();
    }
}

/// What a submit did to the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    /// Moved forward by one step.
    Advanced,
    /// Stayed on the same step; carries the first violated rule.
    Rejected(FormError),
    /// The flow reached its end (terminal state, or wrapped back to the start).
    Completed,
    /// Nothing happened, e.g. a submit while a remote call is in flight.
    Unchanged,
}
