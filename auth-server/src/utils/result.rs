use crate::utils::AppError;

/// Handler result alias
pub type AppResult<T> = Result<T, AppError>;
