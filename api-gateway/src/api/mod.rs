//! API Module

pub mod health;
