//! Bearer tokens: the claims an identity provider signs, verification for
//! incoming requests, and minting for tests and tooling.

mod claims;
mod decoder;
mod encoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
