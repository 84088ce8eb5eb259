//! reqwest-backed [`AuthGatewayPort`].
//!
//! One attempt per call, no retry. Any non-2xx answer is a rejection; a
//! connection failure, timeout or unreadable 2xx body is a transport failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, debug_span, Instrument};

use ct_core::auth::{AuthSession, LoginOutcome, LoginRequest, RegistrationRequest};
use ct_core::ports::{AuthGatewayPort, GatewayError};
use ct_core::Role;

use super::dto::{LoginBody, LoginResponse, RegisterBody, RegisterResponse};

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/auth/login";

pub struct HttpAuthGateway {
    client: Client,
    base_url: String,
}

impl HttpAuthGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        let response = ensure_success(response)?;
        response.json::<R>().await.map_err(transport)
    }
}

fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        debug!(status = status.as_u16(), "account API answered with an error status");
        Err(GatewayError::Rejected {
            status: status.as_u16(),
        })
    }
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        detail: err.to_string(),
    }
}

#[async_trait]
impl AuthGatewayPort for HttpAuthGateway {
    async fn register(&self, request: &RegistrationRequest) -> Result<AuthSession, GatewayError> {
        let span = debug_span!("infra.http.register", role = request.role.api_code());
        async {
            let payload: RegisterResponse = self
                .post_json(REGISTER_PATH, &RegisterBody::from(request))
                .await?;
            Ok(AuthSession {
                token: payload.token,
                user: None,
            })
        }
        .instrument(span)
        .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, GatewayError> {
        let span = debug_span!("infra.http.login", remember_me = request.remember_me);
        async {
            let payload: LoginResponse = self.post_json(LOGIN_PATH, &LoginBody::from(request)).await?;

            let role = payload.role.as_deref().and_then(|raw| match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    debug!(%err, "ignoring role from login response");
                    None
                }
            });
            let user = payload
                .user
                .filter(|value| !value.is_null())
                .map(|value| value.to_string());

            Ok(LoginOutcome {
                session: AuthSession {
                    token: payload.token,
                    user,
                },
                role,
                terms_accepted: payload.accepte_terms.unwrap_or(false),
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn gateway(url: String) -> HttpAuthGateway {
        HttpAuthGateway::new(url, Duration::from_secs(5)).unwrap()
    }

    fn registration() -> RegistrationRequest {
        RegistrationRequest {
            first_name: "Yasmine".into(),
            last_name: "Alaoui".into(),
            email: "yasmine@cotalib.com".into(),
            password: "secret1".into(),
            role: Role::Student,
        }
    }

    fn login() -> LoginRequest {
        LoginRequest {
            email: "sara@cotalib.com".into(),
            password: "secret1".into(),
            remember_me: false,
        }
    }

    #[tokio::test]
    async fn register_posts_json_and_returns_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", REGISTER_PATH)
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "firstname": "Yasmine",
                "email": "yasmine@cotalib.com",
                "role": "STUDENT",
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"tok-1"}"#)
            .create_async()
            .await;

        let session = gateway(server.url()).register(&registration()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(session.token.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn register_error_status_is_a_rejection() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", REGISTER_PATH)
            .with_status(409)
            .with_body(r#"{"message":"exists"}"#)
            .create_async()
            .await;

        let err = gateway(server.url())
            .register(&registration())
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::Rejected { status: 409 });
    }

    #[tokio::test]
    async fn unreadable_success_body_is_a_transport_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", REGISTER_PATH)
            .with_status(200)
            .with_body("<html>ok</html>")
            .create_async()
            .await;

        let err = gateway(server.url())
            .register(&registration())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Transport { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_failure() {
        // nothing listens on the discard port
        let err = gateway("http://127.0.0.1:9".into())
            .login(&login())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Transport { .. }));
    }

    #[tokio::test]
    async fn login_maps_role_terms_and_user() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", LOGIN_PATH)
            .match_body(Matcher::Json(serde_json::json!({
                "email": "sara@cotalib.com",
                "motDePasse": "secret1",
                "rememberMe": false,
            })))
            .with_status(200)
            .with_body(
                r#"{"token":"jwt","user":{"id":7},"role":"Proprietaire","accepteTerms":true}"#,
            )
            .create_async()
            .await;

        let outcome = gateway(format!("{}/", server.url()))
            .login(&login())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outcome.session.token.as_deref(), Some("jwt"));
        assert_eq!(outcome.session.user.as_deref(), Some(r#"{"id":7}"#));
        assert_eq!(outcome.role, Some(Role::Owner));
        assert!(outcome.terms_accepted);
    }

    #[tokio::test]
    async fn login_with_unknown_role_and_no_terms_flag() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", LOGIN_PATH)
            .with_status(200)
            .with_body(r#"{"role":"ADMIN"}"#)
            .create_async()
            .await;

        let outcome = gateway(server.url()).login(&login()).await.unwrap();

        assert_eq!(outcome.role, None);
        assert!(!outcome.terms_accepted);
        assert!(outcome.session.is_empty());
    }
}
