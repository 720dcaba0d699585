//! Type conversion
//!
//! Projects storage models (db::models) into the camelCase response DTOs.
//! Every response passes through these `From` impls, so normalization
//! (string ids, RFC3339 timestamps, default-filled lists) is uniform.

use chrono::{DateTime, Utc};
use serde::Serialize;
use surrealdb::RecordId;

use crate::db::models as db;

// ============ Helpers ============

pub fn id_to_string(id: &Option<RecordId>) -> String {
    id.as_ref().map(|id| id.to_string()).unwrap_or_default()
}

pub fn datetime_to_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ============ Restaurant ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatesDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
    pub zip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatesDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEtaDto {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cuisines: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub avg_cost_for_two: f64,
    pub rating: f64,
    pub review_count: u32,
    pub is_open: bool,
    pub is_archived: bool,
    pub delivery_eta_mins: DeliveryEtaDto,
    pub address: AddressDto,
    pub created_at: String,
    pub updated_at: String,
}

impl From<db::Coordinates> for CoordinatesDto {
    fn from(c: db::Coordinates) -> Self {
        Self { lat: c.lat, lng: c.lng }
    }
}

impl From<db::Address> for AddressDto {
    fn from(a: db::Address) -> Self {
        Self {
            line1: a.line1,
            line2: a.line2,
            city: a.city,
            state: a.state,
            country: a.country,
            zip: a.zip,
            coordinates: a.coordinates.map(Into::into),
        }
    }
}

impl From<db::DeliveryEta> for DeliveryEtaDto {
    fn from(e: db::DeliveryEta) -> Self {
        Self { min: e.min, max: e.max }
    }
}

impl From<db::Restaurant> for RestaurantDto {
    fn from(r: db::Restaurant) -> Self {
        Self {
            id: id_to_string(&r.id),
            name: r.name,
            slug: r.slug,
            description: r.description,
            cuisines: r.cuisines,
            tags: r.tags,
            image_url: r.image_url,
            avg_cost_for_two: r.avg_cost_for_two,
            rating: r.rating,
            review_count: r.review_count,
            is_open: r.is_open,
            is_archived: r.is_archived,
            delivery_eta_mins: r.delivery_eta_mins.into(),
            address: r.address.into(),
            created_at: datetime_to_string(&r.created_at),
            updated_at: datetime_to_string(&r.updated_at),
        }
    }
}

// ============ Menu item ============

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonDto {
    pub name: String,
    pub price: f64,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDto {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_veg: bool,
    pub is_available: bool,
    pub is_archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spice_level: Option<db::SpiceLevel>,
    pub addons: Vec<AddonDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<db::Addon> for AddonDto {
    fn from(a: db::Addon) -> Self {
        Self {
            name: a.name,
            price: a.price,
            is_default: a.is_default,
        }
    }
}

impl From<db::MenuItem> for MenuItemDto {
    fn from(m: db::MenuItem) -> Self {
        Self {
            id: id_to_string(&m.id),
            restaurant_id: m.restaurant.to_string(),
            name: m.name,
            description: m.description,
            price: m.price,
            currency: m.currency,
            category: m.category,
            tags: m.tags,
            image_url: m.image_url,
            is_veg: m.is_veg,
            is_available: m.is_available,
            is_archived: m.is_archived,
            spice_level: m.spice_level,
            addons: m.addons.into_iter().map(Into::into).collect(),
            calories: m.calories,
            created_at: datetime_to_string(&m.created_at),
            updated_at: datetime_to_string(&m.updated_at),
        }
    }
}

/// Single-resource envelope: `{ "data": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
