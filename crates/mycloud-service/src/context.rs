//! Request context carrying the authenticated identity.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use mycloud_auth::guard::{AccessGuard, FileOperation, Principal};
use mycloud_core::error::AppError;
use mycloud_entity::file::StoredFile;
use mycloud_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the API extractor from verified token claims and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// The username (from token claims).
    pub username: String,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        role: UserRole,
        username: String,
        ip_address: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id,
            role,
            username,
            ip_address,
            user_agent,
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The guard principal for this caller.
    pub fn principal(&self) -> Principal {
        Principal::user(self.user_id, self.role)
    }

    /// Run the guard for this caller, logging denials with the client
    /// address and user agent.
    pub fn authorize(
        &self,
        guard: &AccessGuard,
        file: &StoredFile,
        operation: FileOperation,
    ) -> Result<(), AppError> {
        guard
            .authorize(&self.principal(), file, operation)
            .inspect_err(|_| {
                warn!(
                    user_id = %self.user_id,
                    file_id = %file.id,
                    op = operation.as_str(),
                    ip = %self.ip_address,
                    user_agent = self.user_agent.as_deref().unwrap_or("-"),
                    "Access denied"
                );
            })
    }
}
