//! Database Module
//!
//! Owns the embedded SurrealDB handle for the `user` collection.

pub mod models;
pub mod repository;
pub mod schema;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "food";
const DATABASE: &str = "auth";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the RocksDB-backed store at `data_dir` and apply the schema
    pub async fn new(data_dir: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(data_dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::finish_init(db).await
    }

    /// Open an in-memory store (integration tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::finish_init(db).await
    }

    async fn finish_init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        schema::define(&db)
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

        tracing::info!(namespace = NAMESPACE, database = DATABASE, "Database ready");
        Ok(Self { db })
    }
}
