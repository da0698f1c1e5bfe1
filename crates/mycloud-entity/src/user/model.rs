//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A user known to the storage service.
///
/// Rows are created lazily from verified identity tokens; accounts
/// themselves are managed elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier (token subject).
    pub id: Uuid,
    /// Login name as of the latest request.
    pub username: String,
    /// User role.
    pub role: UserRole,
    /// Storage directory relative to the storage root, once assigned.
    pub storage_rel_path: Option<String>,
    /// When the user was first seen.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
