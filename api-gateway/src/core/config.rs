/// Gateway configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | HTTP_PORT | 4000 | HTTP service port |
/// | CATALOG_SERVICE_URL | (unset) | Catalog server base URL, skipped when unset |
/// | AUTH_SERVICE_URL | (unset) | Auth server base URL, skipped when unset |
/// | UPSTREAM_TIMEOUT_MS | 2000 | Per-upstream probe timeout |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_DIR | (unset) | Daily-rolling log file directory |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Catalog server base URL
    pub catalog_url: Option<String>,
    /// Auth server base URL
    pub auth_url: Option<String>,
    /// Per-upstream probe timeout in milliseconds
    pub upstream_timeout_ms: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional log directory for daily-rolling file output
    pub log_dir: Option<String>,
}

/// One configured upstream, probed at `{url}/health`
#[derive(Debug, Clone)]
pub struct Upstream {
    pub name: String,
    pub url: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            catalog_url: std::env::var("CATALOG_SERVICE_URL").ok(),
            auth_url: std::env::var("AUTH_SERVICE_URL").ok(),
            upstream_timeout_ms: std::env::var("UPSTREAM_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// The upstreams to probe. Unconfigured services are left out rather
    /// than reported as down.
    pub fn upstreams(&self) -> Vec<Upstream> {
        let mut list = Vec::new();
        if let Some(url) = &self.catalog_url {
            list.push(Upstream {
                name: "catalog-server".into(),
                url: url.trim_end_matches('/').to_string(),
            });
        }
        if let Some(url) = &self.auth_url {
            list.push(Upstream {
                name: "auth-server".into(),
                url: url.trim_end_matches('/').to_string(),
            });
        }
        list
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Fixed configuration for unit and integration tests
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            catalog_url: Some("http://127.0.0.1:4001".into()),
            auth_url: Some("http://127.0.0.1:4002".into()),
            upstream_timeout_ms: 2000,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_upstreams_are_skipped() {
        let config = Config {
            auth_url: None,
            ..Config::for_tests()
        };
        let upstreams = config.upstreams();
        assert_eq!(upstreams.len(), 1);
        assert_eq!(upstreams[0].name, "catalog-server");
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = Config {
            catalog_url: Some("http://catalog:4001/".into()),
            ..Config::for_tests()
        };
        assert_eq!(config.upstreams()[0].url, "http://catalog:4001");
    }
}
