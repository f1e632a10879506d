use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use zoskagram::logging::init_tracing;
use zoskagram::metrics::init_metrics;
use zoskagram::router::init_router;
use zoskagram::state::init_app_state;
use zoskagram_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();

    // A missing session secret aborts here, before the listener is bound.
    let state = init_app_state(&server_config)
        .await?
        .with_metrics(init_metrics());
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.bind_address))?;

    info!(address = %server_config.bind_address, "Server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
