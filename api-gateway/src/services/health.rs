//! Upstream health fan-out
//!
//! Probes every configured upstream's `/health` concurrently and folds the
//! results into one aggregate. A slow or dead upstream costs at most the
//! probe timeout, never hangs the gateway.

use std::time::{Duration, Instant};

use futures::future::join_all;

use shared::{AggregateHealth, ServiceHealth, ServiceStatus};

use crate::core::config::{Config, Upstream};
use crate::utils::AppError;

#[derive(Clone)]
pub struct UpstreamHealthService {
    client: reqwest::Client,
    upstreams: Vec<Upstream>,
}

impl UpstreamHealthService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.upstream_timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            upstreams: config.upstreams(),
        })
    }

    /// Probe all upstreams concurrently
    pub async fn check_all(&self) -> AggregateHealth {
        let started = Instant::now();
        let checks = self.upstreams.iter().map(|u| self.check_one(u));
        let services = join_all(checks).await;
        AggregateHealth::new(services, started.elapsed().as_millis() as u64)
    }

    async fn check_one(&self, upstream: &Upstream) -> ServiceHealth {
        let url = format!("{}/health", upstream.url);
        let started = Instant::now();
        let outcome = self.client.get(&url).send().await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(response) if response.status().is_success() => {
                let payload = response.json::<serde_json::Value>().await.ok();
                ServiceHealth {
                    name: upstream.name.clone(),
                    url: upstream.url.clone(),
                    status: ServiceStatus::Up,
                    latency_ms,
                    error: None,
                    payload,
                }
            }
            Ok(response) => {
                tracing::warn!(
                    target: "gateway",
                    upstream = %upstream.name,
                    status = %response.status(),
                    "Upstream health check returned an error status"
                );
                ServiceHealth {
                    name: upstream.name.clone(),
                    url: upstream.url.clone(),
                    status: ServiceStatus::Down,
                    latency_ms,
                    error: Some(format!("HTTP {}", response.status())),
                    payload: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    target: "gateway",
                    upstream = %upstream.name,
                    error = %e,
                    "Upstream health check failed"
                );
                ServiceHealth {
                    name: upstream.name.clone(),
                    url: upstream.url.clone(),
                    status: ServiceStatus::Down,
                    latency_ms,
                    error: Some(e.to_string()),
                    payload: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_upstreams_degrade_the_aggregate() {
        // Nothing listens on these ports; both probes must fail fast
        let config = Config {
            catalog_url: Some("http://127.0.0.1:1".into()),
            auth_url: Some("http://127.0.0.1:2".into()),
            upstream_timeout_ms: 200,
            ..Config::for_tests()
        };
        let service = UpstreamHealthService::new(&config).unwrap();
        let aggregate = service.check_all().await;

        assert_eq!(aggregate.status, "degraded");
        assert_eq!(aggregate.services.len(), 2);
        for upstream in &aggregate.services {
            assert_eq!(upstream.status, ServiceStatus::Down);
            assert!(upstream.error.is_some());
            assert!(upstream.payload.is_none());
        }
    }

    #[tokio::test]
    async fn no_upstreams_means_healthy() {
        let config = Config {
            catalog_url: None,
            auth_url: None,
            ..Config::for_tests()
        };
        let service = UpstreamHealthService::new(&config).unwrap();
        let aggregate = service.check_all().await;

        assert_eq!(aggregate.status, "ok");
        assert!(aggregate.services.is_empty());
    }
}
