use crate::services::TokenConfig;

/// Auth server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | HTTP_PORT | 4002 | HTTP service port |
/// | DATA_DIR | /var/lib/food-auth | RocksDB storage directory |
/// | AUTH_JWT_SECRET | dev-shared-secret | HS256 signing secret shared with the catalog server |
/// | AUTH_JWT_ISSUER | (unset) | Stamped into tokens only when set |
/// | AUTH_JWT_AUDIENCE | (unset) | Stamped into tokens only when set |
/// | JWT_EXPIRATION_MINUTES | 60 | Access token lifetime |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | (unset) | Daily-rolling log file directory |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// RocksDB storage directory
    pub data_dir: String,
    /// Token signing settings
    pub token: TokenConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional log directory for daily-rolling file output
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4002),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/var/lib/food-auth".into()),
            token: TokenConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Fixed configuration for unit and integration tests
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            data_dir: String::new(),
            token: TokenConfig::for_tests(),
            environment: "test".into(),
            log_dir: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
