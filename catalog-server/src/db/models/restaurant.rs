//! Restaurant Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub const TABLE: &str = "restaurant";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    pub zip: String,
    pub coordinates: Option<Coordinates>,
}

fn default_country() -> String {
    "India".to_string()
}

/// Estimated delivery window in minutes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryEta {
    #[serde(default = "default_eta_min")]
    pub min: u32,
    #[serde(default = "default_eta_max")]
    pub max: u32,
}

fn default_eta_min() -> u32 {
    25
}

fn default_eta_max() -> u32 {
    35
}

impl Default for DeliveryEta {
    fn default() -> Self {
        Self { min: 25, max: 35 }
    }
}

/// Restaurant record
///
/// `slug` is globally unique, archived records included; the unique index
/// on it backs the slug allocator. Archived records stay in the table
/// forever, reads filter them out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Option<RecordId>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub avg_cost_for_two: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default = "default_true")]
    pub is_open: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub delivery_eta_mins: DeliveryEta,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Partial update; only present fields reach the SET clause.
///
/// `slug` is the already-allocated final value, never a raw hint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub cuisines: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub avg_cost_for_two: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub is_open: Option<bool>,
    pub delivery_eta_mins: Option<DeliveryEta>,
    pub address: Option<Address>,
}

impl RestaurantUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.cuisines.is_none()
            && self.tags.is_none()
            && self.image_url.is_none()
            && self.avg_cost_for_two.is_none()
            && self.rating.is_none()
            && self.review_count.is_none()
            && self.is_open.is_none()
            && self.delivery_eta_mins.is_none()
            && self.address.is_none()
    }
}
