//! Menu Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub const TABLE: &str = "menu_item";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
}

/// Optional extra attached to an item (e.g. "Extra cheese")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Addon {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_default: bool,
}

/// Menu item record
///
/// `restaurant` is a record link to the owning restaurant. Archiving a
/// restaurant leaves its items untouched; item reads are scoped by the
/// resolved restaurant anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Option<RecordId>,
    /// Record link to restaurant
    pub restaurant: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// ISO 4217 code, stored uppercase
    #[serde(default = "default_currency")]
    pub currency: String,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_veg: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_archived: bool,
    pub spice_level: Option<SpiceLevel>,
    #[serde(default)]
    pub addons: Vec<Addon>,
    pub calories: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_true() -> bool {
    true
}

/// Partial update; only present fields reach the SET clause.
/// Values arrive already normalized (currency uppercased, tags sanitized,
/// addon names trimmed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
    pub spice_level: Option<SpiceLevel>,
    pub addons: Option<Vec<Addon>>,
    pub calories: Option<u32>,
}

impl MenuItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.currency.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.image_url.is_none()
            && self.is_veg.is_none()
            && self.is_available.is_none()
            && self.spice_level.is_none()
            && self.addons.is_none()
            && self.calories.is_none()
    }
}
