//! Stored file entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Longest accepted comment, in characters.
pub const MAX_COMMENT_CHARS: usize = 10_000;

/// Metadata for one uploaded blob.
///
/// The bytes live at [`StoredFile::rel_path`] under the storage root; the
/// display name is never used to build that path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredFile {
    /// Unique file identifier.
    pub id: Uuid,
    /// The uploading user. Ownership never changes.
    pub owner_id: Uuid,
    /// Display name shown to users and offered on download.
    pub original_name: String,
    /// Random on-disk identifier, fixed at creation.
    pub disk_name: Uuid,
    /// Owner's storage directory, relative to the storage root.
    pub rel_dir: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// When the upload started.
    pub uploaded_at: DateTime<Utc>,
    /// When the file was last downloaded through any route.
    pub last_downloaded_at: Option<DateTime<Utc>>,
    /// Free-form user comment.
    pub comment: String,
    /// Capability token for unauthenticated download, if published.
    pub public_token: Option<String>,
}

impl StoredFile {
    /// Two-character shard directory derived from the disk name.
    pub fn subdir(&self) -> String {
        self.disk_name.to_string()[..2].to_string()
    }

    /// Blob path relative to the storage root:
    /// `rel_dir/<first two chars of disk_name>/<disk_name>`.
    pub fn rel_path(&self) -> String {
        format!(
            "{}/{}/{}",
            self.rel_dir.trim_end_matches('/'),
            self.subdir(),
            self.disk_name
        )
    }

    /// Whether a public link is currently active.
    pub fn is_public(&self) -> bool {
        self.public_token.is_some()
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStoredFile {
    /// The uploading user.
    pub owner_id: Uuid,
    /// Display name from the client.
    pub original_name: String,
    /// Pre-allocated on-disk identifier.
    pub disk_name: Uuid,
    /// Owner's storage directory.
    pub rel_dir: String,
    /// Declared size, or 0 when unknown.
    pub size_bytes: i64,
    /// Initial comment.
    pub comment: String,
}

/// Partial update of the user-editable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFileDetails {
    /// New display name.
    pub original_name: Option<String>,
    /// New comment.
    pub comment: Option<String>,
}

impl UpdateFileDetails {
    /// True when neither field is set.
    pub fn is_empty(&self) -> bool {
        self.original_name.is_none() && self.comment.is_none()
    }
}
