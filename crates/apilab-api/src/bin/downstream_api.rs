//! # downstream-api — Binary Entry Point
//!
//! Starts the downstream order-intake service. Binds to `0.0.0.0:$PORT`
//! (default 3001).

use apilab_api::state::{DownstreamConfig, DownstreamState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = DownstreamConfig::from_env()?;
    tracing::debug!(?config, "downstream configuration");

    let state = DownstreamState::from_config(&config).map_err(|e| {
        tracing::error!("Canonical schema setup failed: {e}");
        e
    })?;
    tracing::info!(schema = %state.schema.origin(), "canonical schema in effect");

    let app = apilab_api::downstream_app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Downstream API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
