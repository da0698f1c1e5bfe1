//! Stored file repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use mycloud_core::error::AppError;
use mycloud_core::result::AppResult;
use mycloud_entity::file::{CreateStoredFile, StoredFile, UpdateFileDetails};

use super::map_db_error;
use crate::store::FileStore;

/// PostgreSQL-backed [`FileStore`].
#[derive(Debug, Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for PgFileRepository {
    async fn create(&self, data: CreateStoredFile) -> AppResult<StoredFile> {
        sqlx::query_as::<_, StoredFile>(
            "INSERT INTO stored_files \
             (id, owner_id, original_name, disk_name, rel_dir, size_bytes, comment) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.owner_id)
        .bind(&data.original_name)
        .bind(data.disk_name)
        .bind(&data.rel_dir)
        .bind(data.size_bytes)
        .bind(&data.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to create file record"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StoredFile>> {
        sqlx::query_as::<_, StoredFile>("SELECT * FROM stored_files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find file"))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<StoredFile>> {
        sqlx::query_as::<_, StoredFile>("SELECT * FROM stored_files WHERE public_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to find file by token"))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<StoredFile>> {
        sqlx::query_as::<_, StoredFile>(
            "SELECT * FROM stored_files WHERE owner_id = $1 \
             ORDER BY uploaded_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to list files"))
    }

    async fn list_all(&self) -> AppResult<Vec<StoredFile>> {
        sqlx::query_as::<_, StoredFile>(
            "SELECT * FROM stored_files ORDER BY uploaded_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to list files"))
    }

    async fn update_details(&self, id: Uuid, changes: UpdateFileDetails) -> AppResult<StoredFile> {
        sqlx::query_as::<_, StoredFile>(
            "UPDATE stored_files SET \
             original_name = COALESCE($2, original_name), \
             comment = COALESCE($3, comment) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.original_name)
        .bind(changes.comment)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to update file"))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn set_size(&self, id: Uuid, size_bytes: i64) -> AppResult<()> {
        sqlx::query("UPDATE stored_files SET size_bytes = $2 WHERE id = $1")
            .bind(id)
            .bind(size_bytes)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to update file size"))?;
        Ok(())
    }

    async fn touch_downloaded(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE stored_files SET last_downloaded_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to record download"))?;
        Ok(())
    }

    async fn set_public_token(&self, id: Uuid, token: Option<String>) -> AppResult<StoredFile> {
        sqlx::query_as::<_, StoredFile>(
            "UPDATE stored_files SET public_token = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to update public token"))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM stored_files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error(e, "Failed to delete file"))?;
        Ok(result.rows_affected() > 0)
    }
}
