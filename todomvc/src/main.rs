//! TodoMVC server
//!
//! This binary:
//! - Loads configuration from the environment (and `.env`)
//! - Installs the Prometheus recorder when metrics are enabled
//! - Serves the todo list at `/todos` with live updates over WebSocket
//!
//! # Usage
//!
//! ```bash
//! PORT=4001 cargo run --bin todomvc
//! ```

use anyhow::Context;
use liveview_runtime::metrics::PrometheusMetrics;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;
use todomvc::{Config, TodoStore, build_router};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        address = %config.bind_address(),
        metrics = config.live.metrics_enabled,
        "Configuration loaded"
    );

    let metrics = if config.live.metrics_enabled {
        Some(PrometheusMetrics::install().context("installing metrics recorder")?)
    } else {
        None
    };

    let store = Arc::new(TodoStore::new());
    let app = build_router(&config, store, metrics);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("binding {}", config.bind_address()))?;
    info!("Server listening on http://{}/todos", config.bind_address());

    // Open sockets keep the server alive; bound how long we wait for them
    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, app).with_graceful_shutdown({
        let shutdown = Arc::clone(&shutdown);
        async move {
            shutdown_signal().await;
            shutdown.notify_one();
        }
    });

    let timeout = config.shutdown_timeout();
    tokio::select! {
        result = server.into_future() => result.context("serving HTTP")?,
        () = async {
            shutdown.notified().await;
            tokio::time::sleep(timeout).await;
        } => {
            warn!(timeout_secs = timeout.as_secs(), "Connections still open after shutdown timeout");
        }
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
