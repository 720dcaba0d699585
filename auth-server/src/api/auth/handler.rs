//! Signup, login, and token introspection handlers

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use shared::Claims;

use crate::api::extract::Json;
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::RepoError;
use crate::services::TokenError;
use crate::utils::{AppError, AppResult, format_validation_errors};

// ========== Requests ==========

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub token: String,
}

// ========== Responses ==========

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    /// Seconds until expiry
    pub expires_in: i64,
    pub token_type: &'static str,
    pub user: UserDto,
}

/// Introspection result. Always returned with 200; `valid` carries the
/// verdict so gateway callers never have to branch on status codes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Claims>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidateResponse {
    fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            user: None,
            payload: None,
            reason: Some(reason.into()),
        }
    }
}

// ========== Handlers ==========

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub async fn signup(
    State(state): State<ServerState>,
    Json(body): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    body.validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

    let email = normalize_email(&body.email);
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::conflict("An account with this email already exists"));
    }

    let password_hash = User::hash_password(&body.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let name = body.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

    let created = match state.users.create(User::new(email, name, password_hash)).await {
        Ok(user) => user,
        // The unique index catches signups racing between check and insert
        Err(RepoError::Duplicate(_)) => {
            return Err(AppError::conflict("An account with this email already exists"));
        }
        Err(e) => return Err(e.into()),
    };

    let issued = state.tokens.issue(&created)?;
    tracing::info!(target: "auth", email = %created.email, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token: issued.token,
            expires_in: issued.expires_in,
            token_type: "Bearer",
            user: UserDto::from(&created),
        }),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    body.validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

    let email = normalize_email(&body.email);
    // Unknown email and wrong password produce the same response
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let verified = user
        .verify_password(&body.password)
        .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))?;
    if !verified {
        tracing::warn!(target: "security", email = %email, "Failed login attempt");
        return Err(AppError::InvalidCredentials);
    }

    let issued = state.tokens.issue(&user)?;
    Ok(Json(TokenResponse {
        access_token: issued.token,
        expires_in: issued.expires_in,
        token_type: "Bearer",
        user: UserDto::from(&user),
    }))
}

pub async fn validate(
    State(state): State<ServerState>,
    Json(body): Json<ValidateRequest>,
) -> AppResult<Json<ValidateResponse>> {
    let claims = match state.tokens.verify(&body.token) {
        Ok(claims) => claims,
        Err(TokenError::Expired) => return Ok(Json(ValidateResponse::invalid("Token expired"))),
        Err(TokenError::Invalid(reason)) => return Ok(Json(ValidateResponse::invalid(reason))),
    };

    // The subject is a full `user:key` record pointer
    let Some(id) = parse_user_id(&claims.sub) else {
        return Ok(Json(ValidateResponse::invalid("Malformed subject")));
    };
    let Some(user) = state.users.find_by_id(&id).await? else {
        return Ok(Json(ValidateResponse::invalid("User no longer exists")));
    };

    Ok(Json(ValidateResponse {
        valid: true,
        user: Some(UserDto::from(&user)),
        payload: Some(claims),
        reason: None,
    }))
}

fn parse_user_id(raw: &str) -> Option<RecordId> {
    let (table, key) = raw.split_once(':')?;
    if table != "user" || key.is_empty() {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn subject_must_be_a_user_pointer() {
        assert!(parse_user_id("user:abc123").is_some());
        assert!(parse_user_id("restaurant:abc").is_none());
        assert!(parse_user_id("abc123").is_none());
        assert!(parse_user_id("user:").is_none());
    }
}
