//! fiat2btc API Binary
//!
//! Serves the fiat-to-BTC conversion endpoint.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fiat2btc_api::{app_router, ApiConfig, AppState};
use fiat2btc_rates::{ExchangeRateHostSource, RateResolver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting fiat2btc API");

    // Load configuration
    let config = ApiConfig::from_env();
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    // validate() guarantees the credential is present and non-empty.
    let mut source = ExchangeRateHostSource::new(config.access_key.clone().unwrap_or_default());
    if let Some(endpoint) = config.upstream_endpoint.clone() {
        info!(endpoint = %endpoint, "Using upstream endpoint override");
        source = source.with_endpoint(endpoint);
    }

    let resolver = Arc::new(RateResolver::new(Arc::new(source)));
    let router = app_router(AppState { resolver });

    let addr = format!("{}:{}", config.listen_addr, config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(listen_addr = %addr, "API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("API shutdown complete");
    Ok(())
}
