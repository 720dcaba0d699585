//! Service layer

pub mod health;

pub use health::UpstreamHealthService;
