//! Unified error handling
//!
//! Application error type and HTTP mapping:
//! - [`AppError`] - application error enum
//! - [`ErrorBody`] - JSON error body (`{ "message": ... }`)
//!
//! # Status mapping
//!
//! | Variant | HTTP status |
//! |---------|-------------|
//! | Validation, InvalidIdentifier | 400 |
//! | Unauthorized, TokenExpired, InvalidToken | 401 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | Database, Internal | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // ========== Client errors (4xx) ==========
    /// Malformed query or body; message carries the field path
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Syntactically invalid record id where one is required
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Uniqueness violation that survived the allocator's retries
    #[error("Resource already exists: {0}")]
    Conflict(String),

    // ========== Server errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid Authorization header".to_string(),
            ),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired token".to_string())
            }

            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidIdentifier(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<crate::db::repository::RepoError> for AppError {
    fn from(err: crate::db::repository::RepoError) -> Self {
        use crate::db::repository::RepoError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Format `validator` errors as "field.path: message; field: message"
pub fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    collect_validation_errors(errors, "", &mut parts);
    if parts.is_empty() {
        "Invalid request body".to_string()
    } else {
        parts.join("; ")
    }
}

fn collect_validation_errors(
    errors: &validator::ValidationErrors,
    prefix: &str,
    out: &mut Vec<String>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    let msg = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(format!("{path}: {msg}"));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_errors(nested, &path, out);
            }
            ValidationErrorsKind::List(map) => {
                for (idx, nested) in map {
                    collect_validation_errors(nested, &format!("{path}[{idx}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(min = 0.0, message = "must be non-negative"))]
        price: f64,
    }

    #[test]
    fn formats_field_paths_and_messages() {
        let payload = Payload {
            name: String::new(),
            price: -1.0,
        };
        let errors = payload.validate().unwrap_err();
        let formatted = format_validation_errors(&errors);
        assert!(formatted.contains("name: must not be empty"));
        assert!(formatted.contains("price: must be non-negative"));
    }
}
