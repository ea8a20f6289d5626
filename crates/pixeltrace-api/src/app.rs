//! Application builder. Wires router, middleware and state into an Axum
//! app and runs it.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use pixeltrace_collector::CollectorService;
use pixeltrace_core::config::AppConfig;
use pixeltrace_core::config::app::CorsConfig;
use pixeltrace_core::error::AppError;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::build_trace_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(build_compression_layer())
        .layer(build_cors_layer(cors_config))
        .layer(build_trace_layer())
}

/// Runs the PixelTrace server until Ctrl-C, then drains connections for at
/// most `server.shutdown_grace_seconds`.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PixelTrace v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Collector (opens the tracking log) ───────────────
    let collector = Arc::new(CollectorService::from_config(&config).await?);

    // ── Step 2: Build app ────────────────────────────────────────
    let state = AppState::new(collector)?;
    let app = build_app(state, &config.server.cors);

    // ── Step 3: Bind and serve ───────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("PixelTrace listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    })
    .into_future();

    let grace_elapsed = async move {
        if shutdown_rx.wait_for(|stopping| *stopping).await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {}", e)))?;
        }
        _ = grace_elapsed => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed");
        }
    }

    tracing::info!("PixelTrace stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
