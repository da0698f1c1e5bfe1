//! Storage path derivation.
//!
//! Every blob lives at `<user root>/<disk name[0..2]>/<disk name>`, where
//! the user root is fixed the first time the user uploads and the disk
//! name is a random UUID chosen per upload.

use std::path::{Component, Path};

use sha2::{Digest, Sha256};
use uuid::Uuid;

use mycloud_core::config::UserDirScheme;
use mycloud_core::error::AppError;
use mycloud_core::result::AppResult;

/// Derives per-user directories and blob paths.
#[derive(Debug, Clone, Copy)]
pub struct PathAllocator {
    scheme: UserDirScheme,
}

impl PathAllocator {
    /// Create an allocator for the given directory scheme.
    pub fn new(scheme: UserDirScheme) -> Self {
        Self { scheme }
    }

    /// Storage root for a user, relative to the storage root.
    ///
    /// Deterministic for a given input. Usernames that cannot be used as a
    /// single path component fall back to the hashed layout.
    pub fn user_root(&self, user_id: Uuid, username: &str) -> String {
        match self.scheme {
            UserDirScheme::Username if is_safe_username(username) => {
                let prefix: String = username.chars().take(2).collect::<String>().to_lowercase();
                format!("u/{prefix}/{username}")
            }
            _ => hashed_root(user_id),
        }
    }

    /// Fresh on-disk name for a new blob. Collisions are not checked.
    pub fn allocate_disk_name(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// Blob path under `root`: `root/<first two chars>/<disk_name>`.
    pub fn blob_path(&self, root: &str, disk_name: Uuid) -> String {
        let disk = disk_name.to_string();
        format!("{}/{}/{}", root.trim_end_matches('/'), &disk[..2], disk)
    }
}

fn hashed_root(user_id: Uuid) -> String {
    let digest = Sha256::digest(user_id.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!("h/{}/{}", &hex[..2], hex)
}

/// Whether `username` can be used verbatim as a directory name.
pub fn is_safe_username(username: &str) -> bool {
    !username.is_empty()
        && !username.starts_with('.')
        && !username
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control())
}

/// Reject relative paths that would escape the storage root.
pub fn validate_rel_path(path: &str) -> AppResult<()> {
    if path.is_empty() {
        return Err(AppError::validation("Storage path must not be empty"));
    }
    let escapes = Path::new(path).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes || path.contains('\0') {
        return Err(AppError::validation(format!("Invalid storage path: {path}")));
    }
    Ok(())
}
