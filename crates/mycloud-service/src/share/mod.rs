//! Public link management.

pub mod link;
pub mod service;

pub use link::LinkService;
pub use service::ShareService;
