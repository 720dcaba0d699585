//! JWT verification
//!
//! The catalog server never issues tokens; it only verifies what the auth
//! server signed with the shared HS256 secret.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use shared::Claims;
use thiserror::Error;

/// JWT verification settings
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 secret shared with the auth server
    pub secret: String,
    /// Issuer claim, enforced only when set
    pub issuer: Option<String>,
    /// Audience claim, enforced only when set
    pub audience: Option<String>,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("AUTH_JWT_SECRET")
                .unwrap_or_else(|_| "dev-shared-secret".into()),
            issuer: std::env::var("AUTH_JWT_ISSUER").ok(),
            audience: std::env::var("AUTH_JWT_AUDIENCE").ok(),
        }
    }

    pub fn for_tests() -> Self {
        Self {
            secret: "test-secret-test-secret-test-secret".into(),
            issuer: None,
            audience: None,
        }
    }
}

/// JWT verification errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,
}

/// Stateless token verifier
#[derive(Clone)]
pub struct JwtVerifier {
    config: JwtConfig,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish()
    }
}

impl JwtVerifier {
    pub fn new(config: JwtConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    /// Verify and decode a bearer token
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);
        if let Some(issuer) = &self.config.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = &self.config.audience {
            validation.set_audience(&[audience]);
        } else {
            validation.validate_aud = false;
        }

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim)
    }
}

/// Resolved principal (from verified claims)
///
/// Created by the auth middleware and stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Opaque subject id
    pub sub: String,
    pub email: Option<String>,
    pub scope: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            email: claims.email,
            scope: claims.scope,
        }
    }
}

impl AuthUser {
    /// Development principal used when AUTH_DISABLED is set
    pub fn dev() -> Self {
        Self {
            sub: "dev-user".into(),
            email: Some("dev@example.com".into()),
            scope: Some("catalog:admin".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn mint(config: &JwtConfig, exp_offset: Duration) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: "user123".into(),
            email: Some("john@example.com".into()),
            scope: None,
            exp: (now + exp_offset).timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("Failed to encode test token")
    }

    #[test]
    fn verifies_a_valid_token() {
        let config = JwtConfig::for_tests();
        let verifier = JwtVerifier::new(config.clone());
        let token = mint(&config, Duration::minutes(5));

        let claims = verifier.verify(&token).expect("token should verify");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email.as_deref(), Some("john@example.com"));
    }

    #[test]
    fn rejects_an_expired_token() {
        let config = JwtConfig::for_tests();
        let verifier = JwtVerifier::new(config.clone());
        let token = mint(&config, Duration::minutes(-5));

        assert!(matches!(verifier.verify(&token), Err(JwtError::ExpiredToken)));
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let verifier = JwtVerifier::new(JwtConfig::for_tests());
        let other = JwtConfig {
            secret: "another-secret-another-secret-12".into(),
            issuer: None,
            audience: None,
        };
        let token = mint(&other, Duration::minutes(5));

        assert!(matches!(
            verifier.verify(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn extracts_bearer_tokens() {
        assert_eq!(
            JwtVerifier::extract_from_header("Bearer abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(JwtVerifier::extract_from_header("Basic abc"), None);
    }
}
