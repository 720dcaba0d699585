//! Unified error handling

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

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Internal(msg) = &self;
        error!(target: "internal", error = %msg, "Internal error occurred");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
