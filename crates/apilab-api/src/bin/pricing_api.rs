//! # pricing-api — Binary Entry Point
//!
//! Starts the pricing lookup service. Binds to `0.0.0.0:$PORT` (default 3000).

use apilab_api::state::{PricingConfig, PricingState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = PricingConfig::from_env()?;
    tracing::debug!(?config, "pricing configuration");

    let state = PricingState::from_config(&config).map_err(|e| {
        tracing::error!("Catalog load failed: {e}");
        e
    })?;

    let app = apilab_api::pricing_app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Pricing API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
