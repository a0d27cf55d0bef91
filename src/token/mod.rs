//! Signed, expiring verification tokens
//!
//! Tokens are compact HS256 JWTs produced and checked with jsonwebtoken.
//! Nothing outside this module looks inside them.

mod service;
mod types;

pub(crate) use service::expiry_from;
pub use service::TokenService;
pub use types::Claims;
