use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use support_desk_api::config;
use support_desk_api::database::MySqlRegionStore;
use support_desk_api::router::app;
use support_desk_api::state::AppContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so HOST_*/PASSWD_* and API credentials are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config().clone();
    tracing::info!(
        "Starting Support Desk API in {:?} mode, regions {:?}",
        config.environment,
        config.regions
    );

    let store = Arc::new(MySqlRegionStore::new(config.database.clone()));
    let port = config.api.port;
    let ctx = AppContext::new(config, store.clone())
        .context("failed to build HTTP clients")?
        .shared();

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Support Desk API listening on http://{}", bind_addr);

    axum::serve(listener, app(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("Database pools closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
