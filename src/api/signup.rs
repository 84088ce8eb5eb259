use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use ct_app::usecases::{BetaSignupError, SubmitBetaSignup};

use super::dto::{MessageResponse, SignupRequest, EMAIL_FAILED, EMAIL_REQUIRED, EMAIL_SENT};

/// The body is parsed by hand: a malformed payload answers 500, not axum's 4xx.
pub(super) async fn signup(
    State(submit): State<Arc<SubmitBetaSignup>>,
    body: Bytes,
) -> (StatusCode, Json<MessageResponse>) {
    let request: SignupRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(%err, "unreadable signup body");
            return reply(StatusCode::INTERNAL_SERVER_ERROR, EMAIL_FAILED);
        }
    };

    let email = match request.email_text() {
        Ok(email) => email,
        Err(err) => {
            tracing::warn!(%err, "unsupported signup email");
            return reply(StatusCode::INTERNAL_SERVER_ERROR, EMAIL_FAILED);
        }
    };

    match submit.execute(email.as_deref()).await {
        Ok(()) => reply(StatusCode::OK, EMAIL_SENT),
        Err(BetaSignupError::MissingEmail) => reply(StatusCode::BAD_REQUEST, EMAIL_REQUIRED),
        Err(err) => {
            tracing::error!(%err, "beta signup relay failed");
            reply(StatusCode::INTERNAL_SERVER_ERROR, EMAIL_FAILED)
        }
    }
}

fn reply(status: StatusCode, message: &str) -> (StatusCode, Json<MessageResponse>) {
    (status, Json(MessageResponse::new(message)))
}
