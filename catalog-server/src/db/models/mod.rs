//! Storage models
//!
//! Records as they live in SurrealDB. Field names are snake_case; the API
//! layer projects them to camelCase DTOs in `api::convert`.
//!
//! ID convention: `surrealdb::RecordId` everywhere.
//!   - parse: `let id: RecordId = "restaurant:abc".parse()?;`
//!   - build: `RecordId::from_table_key("restaurant", "abc")`
//!   - expose: `id.to_string()` gives the public `table:key` form

pub mod menu_item;
pub mod restaurant;

pub use menu_item::{Addon, MenuItem, MenuItemUpdate, SpiceLevel};
pub use restaurant::{Address, Coordinates, DeliveryEta, Restaurant, RestaurantUpdate};
