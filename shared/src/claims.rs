//! JWT claims shared between the auth server (issuer) and the catalog
//! server (verifier)

use serde::{Deserialize, Serialize};

/// Claims carried in every access token
///
/// `iss`/`aud` are optional: verification only enforces them when the
/// deployment configures them on both sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (opaque user id)
    pub sub: String,
    /// User email, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Space-separated scopes, when issued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Expiry timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}
