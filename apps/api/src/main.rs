mod admin;
mod catalog;
mod config;
mod errors;
mod quiz;
mod result;
mod routes;
mod state;
mod store;
mod stylist;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::stylist::random::ThreadRandom;

#[tokio::main]
async fn main() -> Result<()> {
    // Malformed numeric env vars fail here, before anything is logged
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Stylist API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        delay_ms = config.response_delay_ms,
        jitter_ms = config.response_jitter_ms,
        max_products = config.max_product_recommendations,
        "Stylist reply settings"
    );

    let state = AppState::new(&config, Arc::new(ThreadRandom));
    {
        let store = state.store.read().await;
        info!(
            templates = store.templates.rows().len(),
            rules = store.rules.len(),
            products = state.catalog.all().len(),
            "Config store seeded"
        );
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the storefront domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
