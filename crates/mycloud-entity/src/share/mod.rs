//! Public link value objects.

pub mod link;

pub use link::PublicLink;
