//! User repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use mycloud_core::error::AppError;
use mycloud_core::result::AppResult;
use mycloud_entity::user::{User, UserRole};

use super::map_db_error;
use crate::store::UserStore;

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find user by id"))
    }

    async fn ensure(&self, id: Uuid, username: &str, role: UserRole) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, role) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username, role = EXCLUDED.role \
             RETURNING *",
        )
        .bind(id)
        .bind(username)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to register user"))
    }

    async fn assign_storage_path(&self, id: Uuid, rel_path: &str) -> AppResult<String> {
        // COALESCE under the row lock keeps the first writer's value.
        let effective: Option<Option<String>> = sqlx::query_scalar(
            "UPDATE users SET storage_rel_path = COALESCE(storage_rel_path, $2) \
             WHERE id = $1 RETURNING storage_rel_path",
        )
        .bind(id)
        .bind(rel_path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to assign storage path"))?;

        effective
            .flatten()
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}
