//! # mycloud-core
//!
//! Core crate for MyCloud. Contains the configuration schemas, the
//! storage provider trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other MyCloud crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
