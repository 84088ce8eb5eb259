//! Serve the beta-signup relay.

use std::{future::Future, net::SocketAddr, sync::Arc};

use ct_app::usecases::SubmitBetaSignup;
use tokio::sync::oneshot;

pub mod dto;
mod signup;

pub const SIGNUP_PATH: &str = "/api/signup";

pub struct RelayApi {
    pub addr: SocketAddr,
    pub signup: Arc<SubmitBetaSignup>,
    /// Receives the bound address, so tests can bind to port 0.
    pub addr_sender: Option<oneshot::Sender<SocketAddr>>,
}

impl RelayApi {
    pub fn router(submit: Arc<SubmitBetaSignup>) -> axum::Router {
        axum::Router::new()
            .route(SIGNUP_PATH, axum::routing::post(signup::signup))
            .layer(
                tower::ServiceBuilder::new().layer(tower_http::trace::TraceLayer::new_for_http()),
            )
            .with_state(submit)
    }

    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let app = Self::router(self.signup);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "serving beta-signup relay");
        if let Some(addr_sender) = self.addr_sender {
            let _ = addr_sender.send(local_addr);
        }
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
