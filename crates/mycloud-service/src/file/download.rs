//! File download flows, authenticated and public.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use mycloud_auth::guard::{AccessGuard, FileOperation, Principal};
use mycloud_core::error::AppError;
use mycloud_core::traits::storage::{ByteStream, StorageProvider};
use mycloud_database::FileStore;
use mycloud_entity::file::StoredFile;

use crate::context::RequestContext;

/// Handles file downloads with access checks and streaming.
#[derive(Debug, Clone)]
pub struct DownloadService {
    /// File record store.
    files: Arc<dyn FileStore>,
    /// Blob storage.
    storage: Arc<dyn StorageProvider>,
    /// Access rules.
    guard: AccessGuard,
}

/// An opened download: record, content stream, and response metadata.
pub struct DownloadResult {
    /// File metadata.
    pub file: StoredFile,
    /// Blob content.
    pub stream: ByteStream<'static>,
    /// Blob length in bytes, taken when the blob was opened.
    pub size: u64,
    /// MIME type for Content-Type header.
    pub content_type: String,
    /// Suggested filename for Content-Disposition.
    pub filename: String,
}

impl std::fmt::Debug for DownloadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadResult")
            .field("file", &self.file.id)
            .field("size", &self.size)
            .field("content_type", &self.content_type)
            .field("filename", &self.filename)
            .finish()
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(files: Arc<dyn FileStore>, storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            files,
            storage,
            guard: AccessGuard::new(),
        }
    }

    /// Download a file as its owner or an admin.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<DownloadResult, AppError> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        ctx.authorize(&self.guard, &file, FileOperation::Download)?;

        let result = self.open(file).await?;
        info!(user_id = %ctx.user_id, file_id = %file_id, "File downloaded");
        Ok(result)
    }

    /// Download a file already resolved from a public link token.
    ///
    /// The token is checked against the record again, so a link revoked
    /// between lookup and download is refused as not found.
    pub async fn download_shared(
        &self,
        file: StoredFile,
        token: &str,
    ) -> Result<DownloadResult, AppError> {
        self.guard.authorize(
            &Principal::PublicToken(token.to_string()),
            &file,
            FileOperation::Download,
        )?;

        let file_id = file.id;
        let result = self.open(file).await?;
        info!(file_id = %file_id, "File downloaded via public link");
        Ok(result)
    }

    /// Open the blob, then stamp the download time.
    async fn open(&self, file: StoredFile) -> Result<DownloadResult, AppError> {
        let file_id = file.id;
        let missing = move |e: AppError| {
            if e.is_not_found() {
                warn!(file_id = %file_id, "Blob missing for existing record");
                AppError::not_found("File not found")
            } else {
                e
            }
        };
        let rel_path = file.rel_path();
        let size = self.storage.size(&rel_path).await.map_err(missing)?;
        let stream = self.storage.read(&rel_path).await.map_err(missing)?;

        self.files.touch_downloaded(file.id).await?;

        let content_type = mime_guess::from_path(&file.original_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(DownloadResult {
            filename: file.original_name.clone(),
            file,
            stream,
            size,
            content_type,
        })
    }
}
