//! Startup schema definition

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Idempotent `DEFINE` statements applied at startup
const DEFINITIONS: &[&str] = &[
    "DEFINE TABLE IF NOT EXISTS user SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS uniq_user_email ON user FIELDS email UNIQUE",
];

pub async fn define(db: &Surreal<Db>) -> surrealdb::Result<()> {
    for statement in DEFINITIONS {
        db.query(*statement).await?.check()?;
    }
    Ok(())
}
