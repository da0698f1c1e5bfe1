//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mycloud_entity::file::StoredFile;
use mycloud_entity::share::PublicLink;

/// Stored file as seen by clients.
///
/// Storage location fields (`disk_name`, `rel_dir`) and the owner are
/// never exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    /// File ID.
    pub id: Uuid,
    /// Display name.
    pub original_name: String,
    /// Size in bytes.
    pub size: i64,
    /// Upload time.
    pub uploaded_at: DateTime<Utc>,
    /// Last successful download, if any.
    pub last_downloaded_at: Option<DateTime<Utc>>,
    /// Free-text comment.
    pub comment: String,
    /// Current public token, if published.
    pub public_token: Option<String>,
    /// Whether the file is currently published.
    pub has_public_link: bool,
}

impl From<StoredFile> for FileResponse {
    fn from(file: StoredFile) -> Self {
        let has_public_link = file.is_public();
        Self {
            id: file.id,
            original_name: file.original_name,
            size: file.size_bytes,
            uploaded_at: file.uploaded_at,
            last_downloaded_at: file.last_downloaded_at,
            comment: file.comment,
            public_token: file.public_token,
            has_public_link,
        }
    }
}

/// File listing. `items`, `data`, and `results` carry the same array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    /// Number of files.
    pub count: usize,
    /// Files, newest first.
    pub items: Vec<FileResponse>,
    /// Same as `items`.
    pub data: Vec<FileResponse>,
    /// Same as `items`.
    pub results: Vec<FileResponse>,
}

impl From<Vec<StoredFile>> for FileListResponse {
    fn from(files: Vec<StoredFile>) -> Self {
        let items: Vec<FileResponse> = files.into_iter().map(FileResponse::from).collect();
        Self {
            count: items.len(),
            data: items.clone(),
            results: items.clone(),
            items,
        }
    }
}

/// Issued public link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicLinkResponse {
    /// Public token.
    pub token: String,
    /// Absolute download URL.
    pub url: String,
}

impl From<PublicLink> for PublicLinkResponse {
    fn from(link: PublicLink) -> Self {
        Self {
            token: link.token,
            url: link.url,
        }
    }
}

/// `{"status": ...}` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Outcome.
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" or "degraded".
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Metadata store status.
    pub database: String,
    /// Blob storage status.
    pub storage: String,
}
