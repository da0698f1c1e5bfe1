//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.metadata.health_check().await.unwrap_or(false);
    let storage = state.storage.health_check().await.unwrap_or(false);
    if !storage {
        tracing::warn!(
            provider = state.storage.provider_type(),
            "Storage health check failed"
        );
    }

    let status = if database && storage {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: label(status == StatusCode::OK, "degraded"),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: label(database, "unavailable"),
            storage: label(storage, "unavailable"),
        }),
    )
}

fn label(healthy: bool, otherwise: &str) -> String {
    let text = if healthy { "ok" } else { otherwise };
    text.to_string()
}
