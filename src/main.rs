mod app;
mod config;
mod cors;
mod database;
mod error;
mod handlers;
mod lifespan;
mod models;
mod state;
mod storage;
mod utils;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    app::build_app,
    config::Config,
    database::Database,
    state::AppState,
    storage::{S3Service, S3Storage},
};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let storage = S3Storage::new(&config).await;
    let s3 = S3Service::new(
        Arc::new(storage),
        config.aws_bucket_name.clone(),
        config.aws_region.clone(),
    );

    let database_url = config.database_url();
    let connect = async move {
        Database::connect(&database_url)
            .await
            .context("Failed to connect to db")
    };

    lifespan::run(connect, move |db| async move {
        let addr = config.bind_addr();
        let app = build_app(AppState { db, s3, config });

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")
    })
    .await
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
