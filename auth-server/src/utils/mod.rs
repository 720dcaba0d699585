//! Utility module

pub mod error;
pub mod logger;
pub mod result;

pub use error::{AppError, ErrorBody, format_validation_errors};
pub use result::AppResult;
