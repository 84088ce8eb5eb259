use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use cotalib_lib::api::RelayApi;
use cotalib_lib::bootstrap::{self, wire_dependencies};
use ct_app::usecase_factory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment still applies.
    let dotenv = dotenvy::dotenv();

    let paths = bootstrap::resolve_app_paths()?;
    bootstrap::tracing::init_tracing_subscriber(&paths.logs_dir)
        .context("Failed to initialize tracing")?;
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = bootstrap::load_app_config(&paths)?;
    info!(?config, "configuration loaded");

    let deps = wire_dependencies(&config)?;

    match deps.session_store.load().await {
        Ok(Some(session)) if session.token.is_some() => info!("stored session found"),
        Ok(_) => {}
        Err(err) => warn!(error = %err, "stored session is unreadable"),
    }

    let addr: SocketAddr = config
        .relay_bind_addr
        .parse()
        .with_context(|| format!("Invalid relay bind address: {}", config.relay_bind_addr))?;

    let api = RelayApi {
        addr,
        signup: Arc::new(usecase_factory::submit_beta_signup(&deps)),
        addr_sender: None,
    };
    api.serve(shutdown_signal()).await?;

    info!("relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
