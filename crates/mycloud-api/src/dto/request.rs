//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use mycloud_entity::file::MAX_COMMENT_CHARS;
use mycloud_service::file::UpdateFileRequest;

/// `MAX_COMMENT_CHARS` as the `u64` the validator derive expects.
const MAX_COMMENT_CHARS_U64: u64 = MAX_COMMENT_CHARS as u64;

/// `PATCH /api/files/{id}` body.
///
/// Only the display name and the comment are writable; any other field
/// in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFileBody {
    /// New display name.
    #[validate(length(max = 255, message = "File name is too long"))]
    pub original_name: Option<String>,
    /// New comment.
    #[validate(length(max = MAX_COMMENT_CHARS_U64, message = "Comment is too long"))]
    pub comment: Option<String>,
}

impl From<UpdateFileBody> for UpdateFileRequest {
    fn from(body: UpdateFileBody) -> Self {
        Self {
            original_name: body.original_name,
            comment: body.comment,
        }
    }
}
