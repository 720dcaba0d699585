//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe (public)
//! - [`restaurants`] - restaurant CRUD and the nested menu-item routes
//! - [`menu_items`] - cross-restaurant menu item reads
//! - [`convert`] - storage model to response DTO projection

pub mod convert;
pub mod extract;

pub mod health;
pub mod menu_items;
pub mod restaurants;
