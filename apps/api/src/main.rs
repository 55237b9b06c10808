//! Gateway binary: load configuration, open the database, run
//! migrations, serve HTTP until interrupted.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use shopgate_api::config::ApiConfig;
use shopgate_api::{router, AppState};
use shopgate_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::load()?;

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    let state = Arc::new(AppState::new(db, &config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    info!(%addr, "Gateway listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
    }
}
