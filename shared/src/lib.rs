//! Shared types for the food-ordering platform
//!
//! Common types used across multiple services: the JWT claims issued by the
//! auth server and verified by the catalog server, health payloads consumed
//! by the gateway, and the pagination envelope.

pub mod claims;
pub mod health;
pub mod pagination;

// Re-exports
pub use claims::Claims;
pub use health::{AggregateHealth, ServiceHealth, ServiceStatus};
pub use pagination::{Paginated, PaginationMeta};
