//! Access token issuing and validation
//!
//! HS256 with the secret the catalog server shares. Issuer and audience
//! are stamped and enforced only when configured.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use shared::Claims;

use crate::db::models::User;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HS256 secret shared with the catalog server
    pub secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Access token lifetime in minutes
    pub expiration_minutes: i64,
}

impl TokenConfig {
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("AUTH_JWT_SECRET")
                .unwrap_or_else(|_| "dev-shared-secret".into()),
            issuer: std::env::var("AUTH_JWT_ISSUER").ok(),
            audience: std::env::var("AUTH_JWT_AUDIENCE").ok(),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    pub fn for_tests() -> Self {
        Self {
            secret: "test-secret".into(),
            issuer: None,
            audience: None,
            expiration_minutes: 60,
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// A freshly signed token with its lifetime in seconds
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

pub struct TokenIssuer {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Sign an access token for `user`
    pub fn issue(&self, user: &User) -> AppResult<IssuedToken> {
        let sub = user
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::internal("User record has no id"))?;

        let now = Utc::now();
        let expires_in = self.config.expiration_minutes * 60;
        let claims = Claims {
            sub,
            email: Some(user.email.clone()),
            scope: None,
            exp: (now + Duration::minutes(self.config.expiration_minutes)).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))?;
        Ok(IssuedToken { token, expires_in })
    }

    /// Decode and verify a token signed by this service
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);
        if let Some(iss) = &self.config.issuer {
            validation.set_issuer(&[iss]);
        }
        if let Some(aud) = &self.config.audience {
            validation.set_audience(&[aud]);
        } else {
            validation.validate_aud = false;
        }

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::RecordId;

    fn user() -> User {
        let mut user = User::new("alice@example.com".into(), Some("Alice".into()), "x".into());
        user.id = Some(RecordId::from_table_key("user", "abc123"));
        user
    }

    #[test]
    fn issued_token_verifies_and_carries_identity() {
        let issuer = TokenIssuer::new(TokenConfig::for_tests());
        let issued = issuer.issue(&user()).unwrap();
        assert_eq!(issued.expires_in, 3600);

        let claims = issuer.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "user:abc123");
        assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let issuer = TokenIssuer::new(TokenConfig::for_tests());
        let issued = issuer.issue(&user()).unwrap();
        let other = TokenIssuer::new(TokenConfig {
            secret: "different-secret".into(),
            ..TokenConfig::for_tests()
        });
        assert!(matches!(
            other.verify(&issued.token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn user_without_id_cannot_get_a_token() {
        let issuer = TokenIssuer::new(TokenConfig::for_tests());
        let user = User::new("bob@example.com".into(), None, "x".into());
        assert!(issuer.issue(&user).is_err());
    }
}
