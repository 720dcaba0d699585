//! API Module

pub mod auth;
pub mod extract;
pub mod health;
