//! File listing, upload, update, delete, and download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use futures::StreamExt;
use tracing::warn;
use validator::Validate;

use mycloud_core::error::AppError;
use mycloud_core::traits::storage::ByteStream;
use mycloud_entity::file::{MAX_COMMENT_CHARS, StoredFile};
use mycloud_service::file::{DownloadResult, UploadParams};

use crate::dto::request::UpdateFileBody;
use crate::dto::response::{FileListResponse, FileResponse, StatusResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, FileId};
use crate::state::AppState;

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
) -> Result<Json<FileListResponse>, ApiError> {
    let files = state
        .file_service
        .list(auth.as_ref().map(AuthUser::context))
        .await?;
    Ok(Json(FileListResponse::from(files)))
}

/// POST /api/files (multipart: `file`, optional `comment`)
///
/// The `file` part is streamed straight into storage. A `comment` part may
/// come before or after it. If anything fails once the file is stored, the
/// stored file is removed again before the error is returned.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let mut comment: Option<String> = None;
    let mut uploaded: Option<StoredFile> = None;

    let received: Result<(), ApiError> = async {
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "comment" => comment = Some(read_comment(field).await?),
                "file" if uploaded.is_none() => {
                    let declared_size = field
                        .headers()
                        .get(header::CONTENT_LENGTH)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok());
                    let params = UploadParams {
                        original_name: field.file_name().unwrap_or_default().to_string(),
                        comment: comment.take().unwrap_or_default(),
                        declared_size,
                    };

                    let stream: ByteStream<'_> =
                        Box::pin(field.map(|chunk| chunk.map_err(std::io::Error::other)));
                    uploaded = Some(state.upload_service.upload(&auth, params, stream).await?);
                }
                _ => {}
            }
        }

        if let (Some(file), Some(late_comment)) = (uploaded.as_mut(), comment.take()) {
            let updated = state
                .upload_service
                .attach_comment(file, late_comment)
                .await?;
            *file = updated;
        }
        Ok(())
    }
    .await;

    if let Err(err) = received {
        if let Some(file) = &uploaded {
            warn!(
                user_id = %auth.user_id,
                file_id = %file.id,
                error = %err.0,
                "Upload request failed after the file was stored, discarding it"
            );
            state.upload_service.discard(file).await;
        }
        return Err(err);
    }

    let file = uploaded.ok_or_else(|| AppError::validation("No file was submitted"))?;
    Ok((StatusCode::CREATED, Json(FileResponse::from(file))))
}

/// Read a `comment` part, refusing to buffer more than the longest
/// accepted comment could take in UTF-8.
async fn read_comment(mut field: Field<'_>) -> Result<String, ApiError> {
    let max_bytes = MAX_COMMENT_CHARS * 4;
    let mut buf = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if buf.len() + chunk.len() > max_bytes {
            return Err(AppError::validation("Comment is too long").into());
        }
        buf.extend_from_slice(&chunk);
    }
    String::from_utf8(buf).map_err(|_| AppError::validation("Comment must be UTF-8 text").into())
}

/// PATCH /api/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    auth: AuthUser,
    FileId(id): FileId,
    Json(body): Json<UpdateFileBody>,
) -> Result<Json<FileResponse>, ApiError> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let file = state
        .file_service
        .update_details(&auth, id, body.into())
        .await?;
    Ok(Json(FileResponse::from(file)))
}

/// DELETE /api/files/{id}/delete, POST /api/files/{id}/delete
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    FileId(id): FileId,
) -> Result<Json<StatusResponse>, ApiError> {
    state.file_service.delete(&auth, id).await?;
    Ok(Json(StatusResponse::new("deleted")))
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    FileId(id): FileId,
) -> Result<Response, ApiError> {
    let result = state.download_service.download(&auth, id).await?;
    attachment(result)
}

/// Stream an opened download back as an attachment.
pub(crate) fn attachment(result: DownloadResult) -> Result<Response, ApiError> {
    let encoded = urlencoding::encode(&result.filename);
    let disposition = format!("attachment; filename=\"{encoded}\"; filename*=UTF-8''{encoded}");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.size)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(result.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}
