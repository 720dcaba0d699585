use crate::utils::AppError;

/// Result type for handlers and services
pub type AppResult<T> = Result<T, AppError>;
