//! Authentication gate
//!
//! JWT verification against the auth server's shared secret, the
//! `require_auth` middleware, and the [`AuthUser`] extractor.

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{AuthUser, JwtConfig, JwtError, JwtVerifier};
pub use middleware::require_auth;
