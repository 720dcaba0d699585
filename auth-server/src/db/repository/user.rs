//! User Repository

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::User;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let rows: Vec<User> = self
            .base
            .db()
            .query(format!("SELECT * FROM {TABLE} WHERE email = $email LIMIT 1"))
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(id.clone()).await?;
        Ok(user)
    }

    /// Insert a new account. The unique email index is the backstop; a
    /// violation surfaces as [`RepoError::Duplicate`].
    pub async fn create(&self, user: User) -> RepoResult<User> {
        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}
