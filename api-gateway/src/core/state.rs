//! Server state

use std::sync::Arc;
use std::time::Instant;

use crate::core::Config;
use crate::services::UpstreamHealthService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub upstream_health: UpstreamHealthService,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let upstream_health = UpstreamHealthService::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            upstream_health,
            started_at: Instant::now(),
        })
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
