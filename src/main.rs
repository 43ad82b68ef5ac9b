use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use skinalyze_api::config::config;
use skinalyze_api::database::{DatabaseManager, PgStore};
use skinalyze_api::{app, AppState};

/// Command-line overrides for the environment configuration
#[derive(Parser, Debug)]
#[command(name = "skinalyze-api")]
#[command(about = "Skincare product catalog and recommendation API")]
#[command(version)]
struct ServerArgs {
    /// Port to listen on (default: API_PORT / PORT / 8080)
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address (default: API_BIND or the environment profile)
    #[arg(short, long)]
    bind: Option<String>,

    /// Postgres connection string (default: DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServerArgs::parse();
    let config = config();
    info!("Starting Skinalyze API in {:?} mode", config.environment);

    let database_url = match args.database_url {
        Some(url) => url,
        None => DatabaseManager::database_url()?,
    };
    let pool = DatabaseManager::connect(&database_url, &config.database)
        .await
        .context("failed to connect to the database")?;

    let store = Arc::new(PgStore::new(pool.clone(), config.database.slow_query_threshold()));
    let router = app(AppState::new(store), config);

    let bind = args.bind.unwrap_or_else(|| config.api.bind.clone());
    let port = args.port.unwrap_or(config.api.port);
    let bind_addr = format!("{}:{}", bind, port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Skinalyze API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
