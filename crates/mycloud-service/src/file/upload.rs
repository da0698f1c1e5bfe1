//! Streaming upload flow.

use std::sync::Arc;

use tracing::{info, warn};

use mycloud_core::error::AppError;
use mycloud_core::traits::storage::{ByteStream, StorageProvider};
use mycloud_database::FileStore;
use mycloud_entity::file::{CreateStoredFile, MAX_COMMENT_CHARS, StoredFile, UpdateFileDetails};
use mycloud_storage::PathAllocator;

use crate::context::RequestContext;
use crate::storage::StorageService;

/// Upload parameters that arrive alongside the file bytes.
#[derive(Debug, Clone, Default)]
pub struct UploadParams {
    /// Client-supplied file name; only the final path segment is kept.
    pub original_name: String,
    /// Initial comment.
    pub comment: String,
    /// Size the client announced, if any.
    pub declared_size: Option<u64>,
}

/// Handles single-request streaming uploads.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// File record store.
    files: Arc<dyn FileStore>,
    /// Blob storage.
    storage: Arc<dyn StorageProvider>,
    /// Per-user root resolution.
    roots: Arc<StorageService>,
    /// Path derivation rules.
    allocator: PathAllocator,
    /// Upload size cap in bytes.
    max_bytes: u64,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        files: Arc<dyn FileStore>,
        storage: Arc<dyn StorageProvider>,
        roots: Arc<StorageService>,
        allocator: PathAllocator,
        max_bytes: u64,
    ) -> Self {
        Self {
            files,
            storage,
            roots,
            allocator,
            max_bytes,
        }
    }

    /// Upload size cap in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Reject a declared size above the cap before any byte is read.
    pub fn check_declared_size(&self, declared: Option<u64>) -> Result<(), AppError> {
        match declared {
            Some(size) if size > self.max_bytes => Err(AppError::validation("File too large")),
            _ => Ok(()),
        }
    }

    /// Store an uploaded file for the caller.
    ///
    /// The record is written before the blob so a crash mid-write leaves a
    /// visible record rather than an orphaned blob. Any failure while
    /// streaming removes both again.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        params: UploadParams,
        stream: ByteStream<'_>,
    ) -> Result<StoredFile, AppError> {
        self.check_declared_size(params.declared_size)?;
        check_comment(&params.comment)?;

        let rel_dir = self.roots.ensure_user_root(ctx).await?;
        let disk_name = self.allocator.allocate_disk_name();

        let mut record = self
            .files
            .create(CreateStoredFile {
                owner_id: ctx.user_id,
                original_name: display_name(&params.original_name),
                disk_name,
                rel_dir,
                size_bytes: params.declared_size.unwrap_or(0) as i64,
                comment: params.comment,
            })
            .await?;
        let rel_path = record.rel_path();

        let written = match self
            .storage
            .write_stream(&rel_path, stream, self.max_bytes)
            .await
        {
            Ok(written) => written,
            Err(err) => {
                warn!(
                    user_id = %ctx.user_id,
                    file_id = %record.id,
                    error = %err,
                    "Upload failed, discarding record"
                );
                self.discard(&record).await;
                return Err(err);
            }
        };

        let size = match self.storage.size(&rel_path).await {
            Ok(size) => size,
            Err(e) => {
                warn!(file_id = %record.id, error = %e, "Could not stat uploaded blob");
                written
            }
        };
        if let Err(e) = self.files.set_size(record.id, size as i64).await {
            warn!(file_id = %record.id, error = %e, "Failed to record final size");
        }
        record.size_bytes = size as i64;

        info!(
            user_id = %ctx.user_id,
            file_id = %record.id,
            size,
            "File uploaded"
        );
        Ok(record)
    }

    /// Apply a comment that arrived after the file part.
    pub async fn attach_comment(
        &self,
        file: &StoredFile,
        comment: String,
    ) -> Result<StoredFile, AppError> {
        check_comment(&comment)?;
        self.files
            .update_details(
                file.id,
                UpdateFileDetails {
                    original_name: None,
                    comment: Some(comment),
                },
            )
            .await
    }

    /// Remove a stored upload, blob first. Failures are logged, not returned.
    pub async fn discard(&self, record: &StoredFile) {
        if let Err(e) = self.storage.delete(&record.rel_path()).await {
            warn!(file_id = %record.id, error = %e, "Failed to remove partial blob");
        }
        if let Err(e) = self.files.delete(record.id).await {
            warn!(file_id = %record.id, error = %e, "Failed to remove provisional record");
        }
    }
}

/// Reject comments longer than [`MAX_COMMENT_CHARS`].
pub(crate) fn check_comment(comment: &str) -> Result<(), AppError> {
    if comment.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::validation("Comment is too long"));
    }
    Ok(())
}

/// Last path segment of a client-supplied name, trimmed.
fn display_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
    if base.is_empty() {
        "unnamed".to_string()
    } else {
        base.to_string()
    }
}
