//! Solace chat relay server binary.
//!
//! All configuration comes from the environment (optionally a `.env` file).

use solace_api::config::ApiConfig;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,solace_api=debug,solace_core=debug"))?,
        )
        .init();

    let config = ApiConfig::from_env()?;

    info!(
        bind_addr = %config.bind_addr,
        upstream = %config.upstream_url,
        model = %config.relay.model,
        timeout_secs = config.upstream_timeout.as_secs(),
        "starting solace_api_server"
    );
    if config.api_key.is_none() {
        warn!("GROQ_API_KEY is not set; upstream calls will be rejected");
    }

    let state = solace_api::AppState::from_config(config.clone())?;
    let app = solace_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("ctrl-c received, shutting down");
            }
            shutdown.cancel();
        }
    });

    info!(addr = %local_addr, "chatbot server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
