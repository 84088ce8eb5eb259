//! Field validators.
//!
//! Pure, total predicates consulted on every keystroke (advisory) and again at
//! submit time (authoritative).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::form::FormError;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum length of a password-reset code.
pub const MIN_RESET_CODE_LEN: usize = 4;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// `local@domain.tld`: no whitespace, a single `@`, at least one `.` after the domain.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Plain equality. Two empty strings match; callers reject emptiness separately.
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}

pub fn is_valid_reset_code(code: &str) -> bool {
    code.chars().count() >= MIN_RESET_CODE_LEN
}

/// Live feedback for the email field.
///
/// Empty input is not flagged: the user simply has not typed anything yet.
pub fn inline_email_error(email: &str) -> Option<FormError> {
    if !email.is_empty() && !is_valid_email(email) {
        Some(FormError::InvalidEmail)
    } else {
        None
    }
}
