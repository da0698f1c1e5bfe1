//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// How a user's storage directory is derived the first time they upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserDirScheme {
    /// `u/<prefix>/<username>`, readable on disk.
    #[default]
    Username,
    /// `h/<prefix>/<sha256(user id)>`, independent of the username.
    Hashed,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory all blob paths are relative to.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Maximum size of a single upload in mebibytes.
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: u64,
    /// Per-user directory derivation.
    #[serde(default)]
    pub user_dir_scheme: UserDirScheme,
}

impl StorageConfig {
    /// Upload cap in bytes.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            max_upload_mb: default_max_upload_mb(),
            user_dir_scheme: UserDirScheme::default(),
        }
    }
}

fn default_root_path() -> String {
    "./data/media".to_string()
}

fn default_max_upload_mb() -> u64 {
    500
}
