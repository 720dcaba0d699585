//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Account record
///
/// `email` is normalized (trimmed, lowercased) before it gets here; the
/// unique index enforces one account per address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<RecordId>,
    pub email: String,
    pub name: Option<String>,
    /// PHC-format argon2 hash, never the raw password
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: Option<String>, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            email,
            name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Hash a password with argon2id and a fresh random salt
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Check a candidate password against the stored hash
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = User::hash_password("s3cret-pass").unwrap();
        let user = User::new("a@b.com".into(), None, hash);
        assert!(user.verify_password("s3cret-pass").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = User::hash_password("same").unwrap();
        let second = User::hash_password("same").unwrap();
        assert_ne!(first, second);
    }
}
