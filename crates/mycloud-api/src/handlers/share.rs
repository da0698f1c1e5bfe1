//! Public link handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;

use crate::dto::response::{PublicLinkResponse, StatusResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, FileId};
use crate::handlers::file::attachment;
use crate::state::AppState;

/// POST /api/files/{id}/public-link
pub async fn issue_link(
    State(state): State<AppState>,
    auth: AuthUser,
    FileId(id): FileId,
) -> Result<Json<PublicLinkResponse>, ApiError> {
    let link = state.share_service.issue(&auth, id).await?;
    Ok(Json(PublicLinkResponse::from(link)))
}

/// POST /api/files/{id}/public-link/delete
pub async fn revoke_link(
    State(state): State<AppState>,
    auth: AuthUser,
    FileId(id): FileId,
) -> Result<Json<StatusResponse>, ApiError> {
    state.share_service.revoke(&auth, id).await?;
    Ok(Json(StatusResponse::new("revoked")))
}

/// GET /d/{token}
pub async fn public_download(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let file = state.share_service.resolve(&token).await?;
    let result = state.download_service.download_shared(file, &token).await?;
    attachment(result)
}
