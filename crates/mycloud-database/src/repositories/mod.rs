//! PostgreSQL implementations of the metadata store traits.

pub mod file;
pub mod user;

pub use file::PgFileRepository;
pub use user::PgUserRepository;

use mycloud_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning unique-constraint violations into conflicts.
pub(crate) fn map_db_error(err: sqlx::Error, context: &str) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let message = format!("{context}: duplicate value");
            return AppError::with_source(ErrorKind::Conflict, message, err);
        }
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}
