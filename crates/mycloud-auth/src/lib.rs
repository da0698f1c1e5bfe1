//! # mycloud-auth
//!
//! Identity and authorization for MyCloud.
//!
//! ## Modules
//!
//! - `jwt` — bearer token claims, verification, and minting
//! - `guard` — the owner/admin/public-token access rules for stored files

pub mod guard;
pub mod jwt;

pub use guard::{AccessGuard, FileOperation, Principal};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
