//! Health check route
//!
//! | Path | Method |
//! |------|--------|
//! | /health | GET |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// ok | degraded
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// Whether the embedded store answered a probe query
    database: bool,
    uptime_seconds: u64,
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = state.db.db.query("RETURN 1").await.is_ok();
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        service: "auth-server",
        version: env!("CARGO_PKG_VERSION"),
        database,
        uptime_seconds: state.uptime_seconds(),
    })
}
