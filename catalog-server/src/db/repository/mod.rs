//! Repository Module
//!
//! All SurrealQL lives here. Handlers and services never touch the
//! database handle directly.

pub mod menu_item;
pub mod restaurant;

pub use menu_item::MenuItemRepository;
pub use restaurant::RestaurantRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations read "Database index `x` already contains ..."
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Row shape for `SELECT count() ... GROUP ALL`
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountRow {
    pub count: usize,
}

/// Attach every named filter binding to a query
pub(crate) fn bind_clause<'a, C: surrealdb::Connection>(
    mut query: surrealdb::method::Query<'a, C>,
    clause: &crate::db::filter::WhereClause,
) -> surrealdb::method::Query<'a, C> {
    for (name, value) in clause.bindings.clone() {
        query = query.bind((name, value));
    }
    query
}
