//! # mycloud-api
//!
//! HTTP API layer for MyCloud built on Axum.
//!
//! Provides the file, public link, and health endpoints, the bearer token
//! extractor, request logging and CORS middleware, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
