//! Auth Server - account signup, login, and token validation
//!
//! Issues the HS256 tokens the catalog server verifies. Users live in the
//! service's own embedded SurrealDB.

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use core::{Config, Server, ServerState, build_app};
pub use db::DbService;
pub use utils::{AppError, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};
