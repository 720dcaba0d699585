//! Utility module - common helpers and types
//!
//! - [`AppError`] - application error type
//! - [`AppResult`] - handler result alias
//! - logging and query helpers

pub mod error;
pub mod logger;
pub mod query;
pub mod result;

pub use error::{AppError, ErrorBody, format_validation_errors};
pub use result::AppResult;
