//! Authentication middleware
//!
//! Every catalog route except `/health` passes through [`require_auth`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthUser, JwtVerifier};
use crate::core::ServerState;
use crate::utils::AppError;

/// Require a valid bearer token
///
/// Extracts and verifies the JWT from `Authorization: Bearer <token>` and
/// injects [`AuthUser`] into the request extensions.
///
/// # Skipped requests
///
/// - `OPTIONS *` (CORS preflight)
/// - `/health` (public probe endpoint)
/// - everything, when `AUTH_DISABLED` is set (a dev principal is injected)
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if req.uri().path() == "/health" {
        return Ok(next.run(req).await);
    }

    if state.config.auth_disabled {
        req.extensions_mut().insert(AuthUser::dev());
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtVerifier::extract_from_header(header)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized)?,
        None => {
            tracing::warn!(target: "security", uri = %req.uri(), "Missing Authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt_verifier.verify(token) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthUser::from(claims));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "JWT verification failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}
