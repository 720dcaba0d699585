//! Health payloads exchanged between services and the gateway

use serde::{Deserialize, Serialize};

/// Upstream status as seen by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Up,
    Down,
}

/// One upstream's health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub name: String,
    pub url: String,
    pub status: ServiceStatus,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Raw body returned by the upstream, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// Gateway-level aggregate: `degraded` as soon as any upstream is down
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateHealth {
    pub status: &'static str,
    pub timestamp: String,
    pub latency_ms: u64,
    pub services: Vec<ServiceHealth>,
}

impl AggregateHealth {
    pub fn new(services: Vec<ServiceHealth>, latency_ms: u64) -> Self {
        let degraded = services.iter().any(|s| s.status == ServiceStatus::Down);
        Self {
            status: if degraded { "degraded" } else { "ok" },
            timestamp: chrono::Utc::now().to_rfc3339(),
            latency_ms,
            services,
        }
    }
}
