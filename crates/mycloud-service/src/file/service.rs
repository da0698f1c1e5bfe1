//! File listing, rename/comment, and deletion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use mycloud_auth::guard::{AccessGuard, FileOperation};
use mycloud_core::error::AppError;
use mycloud_core::traits::storage::StorageProvider;
use mycloud_database::FileStore;
use mycloud_entity::file::{StoredFile, UpdateFileDetails, keep_extension};

use super::upload::check_comment;
use crate::context::RequestContext;

/// Changes a caller may make to a file's metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFileRequest {
    /// New display name; the old extension is kept when this has none.
    pub original_name: Option<String>,
    /// New comment.
    pub comment: Option<String>,
}

/// Read and mutate stored file records.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File record store.
    files: Arc<dyn FileStore>,
    /// Blob storage.
    storage: Arc<dyn StorageProvider>,
    /// Access rules.
    guard: AccessGuard,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<dyn FileStore>, storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            files,
            storage,
            guard: AccessGuard::new(),
        }
    }

    /// Files visible to the caller, newest first.
    ///
    /// Anonymous callers see nothing, admins see everything, users see
    /// their own uploads.
    pub async fn list(&self, ctx: Option<&RequestContext>) -> Result<Vec<StoredFile>, AppError> {
        match ctx {
            None => Ok(Vec::new()),
            Some(ctx) if ctx.is_admin() => self.files.list_all().await,
            Some(ctx) => self.files.list_by_owner(ctx.user_id).await,
        }
    }

    /// Load a record, failing with not-found when absent.
    pub async fn find(&self, file_id: Uuid) -> Result<StoredFile, AppError> {
        self.files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Rename and/or re-comment a file. Absent fields stay unchanged.
    pub async fn update_details(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        req: UpdateFileRequest,
    ) -> Result<StoredFile, AppError> {
        let file = self.find(file_id).await?;

        if req.original_name.is_some() {
            ctx.authorize(&self.guard, &file, FileOperation::Rename)?;
        }
        if let Some(comment) = &req.comment {
            ctx.authorize(&self.guard, &file, FileOperation::Comment)?;
            check_comment(comment)?;
        }

        let original_name = match req.original_name {
            Some(name) => {
                let name = keep_extension(&name, &file.original_name);
                if name.is_empty() {
                    return Err(AppError::validation("original_name must not be empty"));
                }
                Some(name)
            }
            None => None,
        };

        let details = UpdateFileDetails {
            original_name,
            comment: req.comment,
        };
        if details.is_empty() {
            ctx.authorize(&self.guard, &file, FileOperation::Read)?;
            return Ok(file);
        }

        let updated = self.files.update_details(file_id, details).await?;

        info!(user_id = %ctx.user_id, file_id = %file_id, "File details updated");
        Ok(updated)
    }

    /// Delete a file's record and, best effort, its blob.
    pub async fn delete(&self, ctx: &RequestContext, file_id: Uuid) -> Result<(), AppError> {
        let file = self.find(file_id).await?;
        ctx.authorize(&self.guard, &file, FileOperation::Delete)?;

        if let Err(e) = self.storage.delete(&file.rel_path()).await {
            warn!(file_id = %file_id, error = %e, "Failed to remove blob, deleting record anyway");
        }

        if !self.files.delete(file_id).await? {
            return Err(AppError::not_found("File not found"));
        }

        info!(user_id = %ctx.user_id, file_id = %file_id, "File deleted");
        Ok(())
    }
}
