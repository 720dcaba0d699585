//! Catalog Server - restaurant and menu catalog service
//!
//! # Module structure
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # config, state, HTTP server
//! ├── auth/          # JWT verification, middleware, extractor
//! ├── services/      # slug allocation, catalog orchestration
//! ├── api/           # routes, handlers, DTO projection
//! ├── db/            # embedded SurrealDB: models, filters, repositories
//! └── utils/         # errors, logging, query helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{AuthUser, JwtConfig, JwtVerifier};
pub use core::{Config, Server, ServerState, build_app};
pub use db::DbService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
