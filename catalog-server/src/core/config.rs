use crate::auth::JwtConfig;

/// Catalog server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | HTTP_PORT | 4001 | HTTP service port |
/// | DATA_DIR | /var/lib/food-catalog | RocksDB storage directory |
/// | DEFAULT_PAGE_SIZE | 20 | Page size when `limit` is absent |
/// | MAX_PAGE_SIZE | 50 | Hard cap on `limit` |
/// | AUTH_JWT_SECRET | dev-shared-secret | HS256 secret shared with the auth server |
/// | AUTH_JWT_ISSUER | (unset) | Enforced only when set |
/// | AUTH_JWT_AUDIENCE | (unset) | Enforced only when set |
/// | AUTH_DISABLED | false | Inject a dev principal instead of verifying |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | (unset) | Daily-rolling log file directory |
///
/// # Example
///
/// ```ignore
/// DATA_DIR=/data/catalog HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// RocksDB storage directory
    pub data_dir: String,
    /// Page size used when the query omits `limit`
    pub default_page_size: u32,
    /// Hard cap on requested page size
    pub max_page_size: u32,
    /// JWT verification settings
    pub jwt: JwtConfig,
    /// Skip token verification and inject a dev principal
    pub auth_disabled: bool,
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
                .unwrap_or(4001),
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "/var/lib/food-catalog".into()),
            default_page_size: std::env::var("DEFAULT_PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(20),
            max_page_size: std::env::var("MAX_PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(50),
            jwt: JwtConfig::from_env(),
            auth_disabled: std::env::var("AUTH_DISABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
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
            default_page_size: 20,
            max_page_size: 50,
            jwt: JwtConfig::for_tests(),
            auth_disabled: false,
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
