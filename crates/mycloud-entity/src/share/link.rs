//! Public link value object.

use serde::{Deserialize, Serialize};

/// A freshly issued public download link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicLink {
    /// The file the link points at.
    pub file_id: uuid::Uuid,
    /// The capability token embedded in the URL.
    pub token: String,
    /// The full URL for unauthenticated download.
    pub url: String,
}

impl PublicLink {
    /// Build a link from a token and the externally visible base URL.
    pub fn new(file_id: uuid::Uuid, token: String, base_url: &str) -> Self {
        let url = format!("{}/d/{}", base_url.trim_end_matches('/'), token);
        Self {
            file_id,
            token,
            url,
        }
    }
}
