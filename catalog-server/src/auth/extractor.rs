//! AuthUser extractor
//!
//! Lets protected handlers take the resolved principal as an argument.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::AuthUser;
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // The middleware runs first; absence means the route was wired
        // outside the auth layer.
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
