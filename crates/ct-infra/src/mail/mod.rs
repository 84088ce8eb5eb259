mod smtp_relay;

pub use smtp_relay::{SmtpMailRelay, SIGNUP_BODY_PREFIX, SIGNUP_SUBJECT};
