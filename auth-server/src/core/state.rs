//! Server state
//!
//! Shared references handed to every handler.

use std::sync::Arc;
use std::time::Instant;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::UserRepository;
use crate::services::TokenIssuer;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub users: UserRepository,
    pub tokens: Arc<TokenIssuer>,
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
        let users = UserRepository::new(db.db.clone());
        let tokens = Arc::new(TokenIssuer::new(config.token.clone()));
        Self {
            config: Arc::new(config),
            db,
            users,
            tokens,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
