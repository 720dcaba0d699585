//! Server Implementation
//!
//! Router assembly, middleware stack, and the HTTP server loop.

use std::net::SocketAddr;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public route
        .merge(crate::api::health::router())
        // Catalog APIs - authentication required
        .merge(crate::api::restaurants::router())
        .merge(crate::api::menu_items::router())
}

/// Build a fully configured application with middleware and state.
/// `require_auth` guards everything except OPTIONS and `/health`.
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// HTTP Server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<(), AppError> {
        let state = ServerState::initialize(self.config).await?;
        let app = build_app(&state);

        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        tracing::info!(%addr, "Catalog server listening");

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
