//! Application builder: wires router, middleware, and state into an Axum app.

use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use mycloud_core::config::AppConfig;
use mycloud_core::error::AppError;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the MyCloud server until a shutdown signal arrives.
///
/// In-flight requests get `server.shutdown_grace_seconds` to finish once
/// the signal is received.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MyCloud server...");

    let addr = config.server.bind_addr();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    tracing::info!(
        provider = %config.database.provider,
        root = %config.storage.root_path,
        max_upload_mb = config.storage.max_upload_mb,
        "Initializing backends"
    );
    let state = AppState::build(config).await?;
    let metadata = state.metadata.clone();
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("MyCloud server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    let outcome = tokio::select! {
        joined = &mut server => joined,
        _ = shutdown_signal() => {
            tracing::info!(grace_seconds = grace.as_secs(), "Shutdown signal received, draining");
            let _ = shutdown_tx.send(true);
            match tokio::time::timeout(grace, &mut server).await {
                Ok(joined) => joined,
                Err(_) => {
                    tracing::warn!("Graceful shutdown timed out, aborting open connections");
                    server.abort();
                    Ok(Ok(()))
                }
            }
        }
    };

    metadata.close().await;

    match outcome {
        Ok(Ok(())) => {
            tracing::info!("MyCloud server stopped");
            Ok(())
        }
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
}
