//! Aggregate health route
//!
//! | Path | Method |
//! |------|--------|
//! | /health | GET |
//!
//! Fans out to every configured upstream and reports `degraded` as soon
//! as one of them is down.

use axum::{Json, Router, extract::State, routing::get};

use shared::AggregateHealth;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

async fn health(State(state): State<ServerState>) -> Json<AggregateHealth> {
    Json(state.upstream_health.check_all().await)
}
