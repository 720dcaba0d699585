//! Server state
//!
//! Shared references handed to every handler. Cloning is shallow; the
//! database handle and services are reference counted internally.

use std::sync::Arc;
use std::time::Instant;

use crate::auth::JwtVerifier;
use crate::core::Config;
use crate::db::DbService;
use crate::services::CatalogService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub jwt_verifier: Arc<JwtVerifier>,
    pub catalog: CatalogService,
    pub started_at: Instant,
}

impl ServerState {
    /// Open the configured data directory and wire up all services
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.data_dir).await?;
        Ok(Self::with_db(config, db))
    }

    /// Build state around an existing database handle (tests use the
    /// in-memory engine here)
    pub fn with_db(config: Config, db: DbService) -> Self {
        let jwt_verifier = Arc::new(JwtVerifier::new(config.jwt.clone()));
        let catalog = CatalogService::new(db.db.clone());
        Self {
            config: Arc::new(config),
            db,
            jwt_verifier,
            catalog,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
