// Main entry point for the carbon accounting API server

use anyhow::{Context, Result};
use server_core::server::{build_app, AppState};
use server_core::{seed, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Carbonledger API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Build stores and application state
    let state = AppState::new(&config);

    // Install the demo fixture unless disabled
    if config.seed_demo_data {
        seed::seed_demo_data(state.directory.as_ref(), state.ledger.as_ref(), &state.users)
            .await
            .context("Failed to seed demo data")?;
        tracing::info!("Demo data seeded");
    }

    let app = build_app(state, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
