//! Route definitions for the MyCloud HTTP API.
//!
//! Routes are organized by domain and mounted under `/api`, except the
//! public download route which lives at `/d/{token}`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and the other form fields.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = (state.config.storage.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES) as usize;

    let api_routes = Router::new()
        .merge(file_routes())
        .merge(share_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/d/{token}", get(handlers::share::public_download))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// File listing, upload, update, delete, download
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::file::list_files).post(handlers::file::upload_file),
        )
        .route("/files/{id}", patch(handlers::file::update_file))
        .route(
            "/files/{id}/delete",
            post(handlers::file::delete_file).delete(handlers::file::delete_file),
        )
        .route("/files/{id}/download", get(handlers::file::download_file))
}

/// Public link issue and revoke
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/files/{id}/public-link", post(handlers::share::issue_link))
        .route(
            "/files/{id}/public-link/delete",
            post(handlers::share::revoke_link),
        )
}

/// Health check (no auth)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
