use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EMAIL_SENT: &str = "Email sent successfully";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_FAILED: &str = "Error sending email";

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
#[error("email must be a string, number or boolean")]
pub struct UnsupportedEmail;

impl SignupRequest {
    /// Text to relay for the submitted `email`.
    ///
    /// Falsy scalars (`null`, `false`, `0`, `""`) and a missing key yield
    /// `None`. Other scalars are relayed in their textual form.
    pub fn email_text(&self) -> Result<Option<String>, UnsupportedEmail> {
        match &self.email {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
            Some(Value::Bool(true)) => Ok(Some("true".to_string())),
            Some(Value::String(email)) if email.is_empty() => Ok(None),
            Some(Value::String(email)) => Ok(Some(email.clone())),
            Some(Value::Number(number)) => {
                if number.as_f64() == Some(0.0) {
                    return Ok(None);
                }
                let text = match (number.as_i64(), number.as_u64(), number.as_f64()) {
                    (Some(n), _, _) => n.to_string(),
                    (_, Some(n), _) => n.to_string(),
                    (_, _, Some(n)) => n.to_string(),
                    _ => number.to_string(),
                };
                Ok(Some(text))
            }
            Some(Value::Array(_)) | Some(Value::Object(_)) => Err(UnsupportedEmail),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
