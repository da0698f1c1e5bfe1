//! Per-user storage roots.

pub mod service;

pub use service::StorageService;
