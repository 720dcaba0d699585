//! API Gateway - single public entry point for the platform
//!
//! Aggregates upstream health for load balancers and dashboards. Requests
//! to the catalog and auth services carry their own tokens; the gateway
//! does not terminate authentication.

pub mod api;
pub mod core;
pub mod services;
pub mod utils;

pub use core::{Config, Server, ServerState, build_app};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{AppError, AppResult};
