mod api;
mod config;
mod error;
mod state;
mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;
use upstream::UpstreamClient;

#[tokio::main]
async fn main() {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinefav_server=info,tower_http=info")),
        )
        .init();

    tracing::info!("cinefav proxy starting...");

    // Load .env file if present (non-fatal if missing).
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env file loaded: {e}");
    }

    let config = Config::from_env();

    let upstream = match UpstreamClient::new(&config.api_base_url, config.upstream_timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to create upstream client");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        api_base_url = upstream.base_url(),
        timeout_secs = config.upstream_timeout.as_secs(),
        "configuration loaded"
    );

    let state = Arc::new(AppState { upstream });
    let router = api::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind HTTP listener");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "cinefav proxy running");

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!(error = %e, "Axum server error");
        std::process::exit(1);
    }
}
