//! Issuing, revoking, and resolving public links.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use mycloud_auth::guard::{AccessGuard, FileOperation};
use mycloud_core::error::AppError;
use mycloud_database::FileStore;
use mycloud_entity::file::StoredFile;
use mycloud_entity::share::PublicLink;

use super::link::LinkService;
use crate::context::RequestContext;

/// Public link lifecycle: Private -> Public (issue), Public -> Public
/// (re-issue rotates the token), Public -> Private (revoke).
#[derive(Debug, Clone)]
pub struct ShareService {
    /// File record store.
    files: Arc<dyn FileStore>,
    /// Token generation.
    links: LinkService,
    /// Access rules.
    guard: AccessGuard,
    /// Externally visible base URL for building link URLs.
    public_base_url: String,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(files: Arc<dyn FileStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            files,
            links: LinkService::new(),
            guard: AccessGuard::new(),
            public_base_url: public_base_url.into(),
        }
    }

    async fn find(&self, file_id: Uuid) -> Result<StoredFile, AppError> {
        self.files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Publish a file, replacing any existing token.
    pub async fn issue(&self, ctx: &RequestContext, file_id: Uuid) -> Result<PublicLink, AppError> {
        let file = self.find(file_id).await?;
        ctx.authorize(&self.guard, &file, FileOperation::IssueLink)?;

        let token = self.links.generate_token();
        let updated = self
            .files
            .set_public_token(file_id, Some(token.clone()))
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            rotated = file.public_token.is_some(),
            "Public link issued"
        );
        Ok(PublicLink::new(updated.id, token, &self.public_base_url))
    }

    /// Unpublish a file. Revoking a private file is a no-op.
    pub async fn revoke(&self, ctx: &RequestContext, file_id: Uuid) -> Result<StoredFile, AppError> {
        let file = self.find(file_id).await?;
        ctx.authorize(&self.guard, &file, FileOperation::RevokeLink)?;

        let updated = self.files.set_public_token(file_id, None).await?;
        info!(user_id = %ctx.user_id, file_id = %file_id, "Public link revoked");
        Ok(updated)
    }

    /// Look up the file currently published under `token`.
    pub async fn resolve(&self, token: &str) -> Result<StoredFile, AppError> {
        if !self.links.is_well_formed(token) {
            return Err(AppError::not_found("File not found"));
        }
        self.files
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }
}
