//! Access rules for stored files.
//!
//! Admins may do anything. Owners may do anything with their own files.
//! Everyone else is denied, except that anyone holding a file's current
//! public token may download that file.

use uuid::Uuid;

use mycloud_core::error::AppError;
use mycloud_entity::file::StoredFile;
use mycloud_entity::user::UserRole;

/// Who is asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// An authenticated user.
    User {
        /// User ID from the verified token.
        id: Uuid,
        /// Role from the verified token.
        role: UserRole,
    },
    /// An unauthenticated caller presenting a public link token.
    PublicToken(String),
    /// No credentials at all.
    Anonymous,
}

impl Principal {
    /// Authenticated user principal.
    pub fn user(id: Uuid, role: UserRole) -> Self {
        Self::User { id, role }
    }

    /// Whether this is an authenticated admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::User { role, .. } if role.is_admin())
    }
}

/// Operations that can be performed on a stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileOperation {
    Read,
    Rename,
    Comment,
    Delete,
    IssueLink,
    RevokeLink,
    Download,
}

impl FileOperation {
    /// Short lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Rename => "rename",
            Self::Comment => "comment",
            Self::Delete => "delete",
            Self::IssueLink => "issue_link",
            Self::RevokeLink => "revoke_link",
            Self::Download => "download",
        }
    }
}

/// The single place file access decisions are made.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    /// Create a guard.
    pub fn new() -> Self {
        Self
    }

    /// Decide whether `principal` may perform `operation` on `file`.
    pub fn can_access(&self, principal: &Principal, file: &StoredFile, operation: FileOperation) -> bool {
        match principal {
            Principal::User { role, .. } if role.is_admin() => true,
            Principal::User { id, .. } => *id == file.owner_id,
            Principal::PublicToken(token) => {
                operation == FileOperation::Download
                    && !token.is_empty()
                    && file.public_token.as_deref() == Some(token.as_str())
            }
            Principal::Anonymous => false,
        }
    }

    /// Like [`can_access`](Self::can_access), but a denial becomes the
    /// matching error: 401 for anonymous callers, 403 for other users, and
    /// a plain not-found for a token that does not match.
    pub fn authorize(
        &self,
        principal: &Principal,
        file: &StoredFile,
        operation: FileOperation,
    ) -> Result<(), AppError> {
        if self.can_access(principal, file, operation) {
            return Ok(());
        }
        Err(match principal {
            Principal::Anonymous => AppError::unauthorized("Authentication required"),
            Principal::User { .. } => AppError::forbidden("Forbidden"),
            Principal::PublicToken(_) => AppError::not_found("File not found"),
        })
    }
}
