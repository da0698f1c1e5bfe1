//! Request and response DTOs.

pub mod request;
pub mod response;

pub use request::UpdateFileBody;
pub use response::{
    FileListResponse, FileResponse, HealthResponse, PublicLinkResponse, StatusResponse,
};
