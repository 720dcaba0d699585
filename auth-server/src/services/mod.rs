//! Service layer

pub mod token;

pub use token::{IssuedToken, TokenConfig, TokenError, TokenIssuer};
