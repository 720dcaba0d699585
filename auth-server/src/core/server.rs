//! Server Implementation
//!
//! Router assembly, middleware stack, and the HTTP server loop. Every
//! route here is public; the catalog server is what checks tokens.

use std::net::SocketAddr;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
}

/// Build a fully configured application with middleware and state
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        .with_state(state.clone())
        .layer(CorsLayer::permissive())
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
        tracing::info!(%addr, "Auth server listening");

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
