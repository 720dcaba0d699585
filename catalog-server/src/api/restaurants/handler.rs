//! Restaurant API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use shared::Paginated;

use crate::api::convert::{DataEnvelope, RestaurantDto};
use crate::api::extract::Json;
use crate::auth::AuthUser;
use crate::core::ServerState;
use crate::db::filter::{RestaurantFilter, RestaurantSort};
use crate::db::models::{Address, Coordinates, DeliveryEta, Restaurant, RestaurantUpdate};
use crate::utils::query::{PageWindow, sanitize_list, split_csv, trimmed};
use crate::utils::{AppError, AppResult, format_validation_errors};

// ========== Query / body schemas ==========

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListRestaurantsQuery {
    pub page: Option<u32>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub limit: Option<u32>,
    pub city: Option<String>,
    /// Comma-separated
    pub cuisines: Option<String>,
    /// Comma-separated
    pub tags: Option<String>,
    pub q: Option<String>,
    pub is_open: Option<bool>,
    #[validate(range(min = 0.0, max = 5.0, message = "must be between 0 and 5"))]
    pub min_rating: Option<f64>,
    /// rating | deliveryEta | cost | name
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatesBody {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub lng: f64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressBody {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub line1: String,
    pub line2: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub city: String,
    pub state: Option<String>,
    pub country: Option<String>,
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub zip: String,
    #[validate(nested)]
    pub coordinates: Option<CoordinatesBody>,
}

/// Both bounds are required whenever the object is present; a
/// half-specified window would silently rewrite the other bound on PATCH.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_eta_window"))]
pub struct DeliveryEtaBody {
    #[validate(range(min = 1, message = "must be positive"))]
    pub min: u32,
    #[validate(range(min = 1, message = "must be positive"))]
    pub max: u32,
}

fn validate_eta_window(eta: &DeliveryEtaBody) -> Result<(), ValidationError> {
    if eta.max < eta.min {
        return Err(ValidationError::new("eta_window")
            .with_message("max must be greater than or equal to min".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    #[validate(length(min = 1, max = 160, message = "must be 1-160 characters"))]
    pub name: String,
    /// Slug hint; the final slug is allocated server-side
    pub slug: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub avg_cost_for_two: Option<f64>,
    #[validate(range(min = 0.0, max = 5.0, message = "must be between 0 and 5"))]
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub is_open: Option<bool>,
    #[validate(nested)]
    pub delivery_eta_mins: Option<DeliveryEtaBody>,
    #[validate(nested)]
    pub address: AddressBody,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatchRestaurantRequest {
    #[validate(length(min = 1, max = 160, message = "must be 1-160 characters"))]
    pub name: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
    pub cuisines: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub avg_cost_for_two: Option<f64>,
    #[validate(range(min = 0.0, max = 5.0, message = "must be between 0 and 5"))]
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub is_open: Option<bool>,
    #[validate(nested)]
    pub delivery_eta_mins: Option<DeliveryEtaBody>,
    #[validate(nested)]
    pub address: Option<AddressBody>,
}

impl From<CoordinatesBody> for Coordinates {
    fn from(c: CoordinatesBody) -> Self {
        Self { lat: c.lat, lng: c.lng }
    }
}

impl From<AddressBody> for Address {
    fn from(a: AddressBody) -> Self {
        Self {
            line1: a.line1.trim().to_string(),
            line2: trimmed(a.line2),
            city: a.city.trim().to_string(),
            state: trimmed(a.state),
            country: trimmed(a.country).unwrap_or_else(|| "India".to_string()),
            zip: a.zip.trim().to_string(),
            coordinates: a.coordinates.map(Into::into),
        }
    }
}

impl From<DeliveryEtaBody> for DeliveryEta {
    fn from(e: DeliveryEtaBody) -> Self {
        Self { min: e.min, max: e.max }
    }
}

impl CreateRestaurantRequest {
    fn slug_hint(&self) -> String {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
            .to_string()
    }

    fn into_record(self) -> Restaurant {
        let now = Utc::now();
        Restaurant {
            id: None,
            name: self.name.trim().to_string(),
            // Allocated by the service before the write
            slug: String::new(),
            description: trimmed(self.description),
            cuisines: sanitize_list(self.cuisines),
            tags: sanitize_list(self.tags),
            image_url: self.image_url,
            avg_cost_for_two: self.avg_cost_for_two.unwrap_or(0.0),
            rating: self.rating.unwrap_or(0.0),
            review_count: self.review_count.unwrap_or(0),
            is_open: self.is_open.unwrap_or(true),
            is_archived: false,
            delivery_eta_mins: self.delivery_eta_mins.map(Into::into).unwrap_or_default(),
            address: self.address.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl PatchRestaurantRequest {
    fn is_empty(&self) -> bool {
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

    fn into_update(self) -> (Option<String>, RestaurantUpdate) {
        let slug_hint = self.slug.map(|s| s.trim().to_string());
        let update = RestaurantUpdate {
            name: self.name.map(|n| n.trim().to_string()),
            // Allocated by the service when a hint is present
            slug: None,
            description: trimmed(self.description),
            cuisines: self.cuisines.map(sanitize_list),
            tags: self.tags.map(sanitize_list),
            image_url: self.image_url,
            avg_cost_for_two: self.avg_cost_for_two,
            rating: self.rating,
            review_count: self.review_count,
            is_open: self.is_open,
            delivery_eta_mins: self.delivery_eta_mins.map(Into::into),
            address: self.address.map(Into::into),
        };
        (slug_hint, update)
    }
}

fn parse_sort(raw: Option<&str>) -> AppResult<RestaurantSort> {
    match raw {
        None | Some("name") => Ok(RestaurantSort::Name),
        Some("rating") => Ok(RestaurantSort::Rating),
        Some("deliveryEta") => Ok(RestaurantSort::DeliveryEta),
        Some("cost") => Ok(RestaurantSort::Cost),
        Some(other) => Err(AppError::validation(format!(
            "sort: unknown value '{other}'"
        ))),
    }
}

// ========== Handlers ==========

/// GET /restaurants - filtered, sorted, paginated list
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListRestaurantsQuery>,
) -> AppResult<Json<Paginated<RestaurantDto>>> {
    query
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;
    let sort = parse_sort(query.sort.as_deref())?;
    let window = PageWindow::resolve(query.page, query.limit, &state.config);

    let filter = RestaurantFilter {
        city: trimmed(query.city),
        cuisines: split_csv(query.cuisines.as_deref()),
        tags: split_csv(query.tags.as_deref()),
        is_open: query.is_open,
        min_rating: query.min_rating,
        q: trimmed(query.q),
    };

    let (rows, total) = state.catalog.restaurants().find(&filter, sort, &window).await?;
    let data = rows.into_iter().map(RestaurantDto::from).collect();
    Ok(Json(Paginated::new(
        data,
        window.page,
        window.page_size,
        total as u64,
    )))
}

/// POST /restaurants - create with server-allocated slug
pub async fn create(
    State(state): State<ServerState>,
    user: AuthUser,
    Json(payload): Json<CreateRestaurantRequest>,
) -> AppResult<(StatusCode, Json<DataEnvelope<RestaurantDto>>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

    let hint = payload.slug_hint();
    let created = state
        .catalog
        .create_restaurant(&hint, payload.into_record())
        .await?;
    tracing::info!(
        target: "catalog",
        user = %user.sub,
        slug = %created.slug,
        "Restaurant created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataEnvelope::new(created.into())),
    ))
}

/// GET /restaurants/:id_or_slug
pub async fn get_by_id_or_slug(
    State(state): State<ServerState>,
    Path(id_or_slug): Path<String>,
) -> AppResult<Json<DataEnvelope<RestaurantDto>>> {
    let restaurant = state.catalog.resolve_restaurant(&id_or_slug).await?;
    Ok(Json(DataEnvelope::new(restaurant.into())))
}

/// PATCH /restaurants/:id_or_slug - partial update, re-slugs on rename
pub async fn update(
    State(state): State<ServerState>,
    user: AuthUser,
    Path(id_or_slug): Path<String>,
    Json(payload): Json<PatchRestaurantRequest>,
) -> AppResult<Json<DataEnvelope<RestaurantDto>>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;
    if payload.is_empty() {
        return Err(AppError::validation(
            "At least one field must be provided",
        ));
    }

    let (slug_hint, update) = payload.into_update();
    let updated = state
        .catalog
        .update_restaurant(&id_or_slug, slug_hint.as_deref(), update)
        .await?;
    tracing::info!(
        target: "catalog",
        user = %user.sub,
        slug = %updated.slug,
        "Restaurant updated"
    );
    Ok(Json(DataEnvelope::new(updated.into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn half_specified_eta_window_is_rejected() {
        // A lone bound must not default the other and overwrite it
        let patch = serde_json::from_value::<PatchRestaurantRequest>(json!({
            "deliveryEtaMins": { "max": 50 }
        }));
        assert!(patch.is_err());

        let create_body = serde_json::from_value::<DeliveryEtaBody>(json!({ "min": 10 }));
        assert!(create_body.is_err());
    }

    #[test]
    fn eta_window_requires_max_at_least_min() {
        let eta: DeliveryEtaBody =
            serde_json::from_value(json!({ "min": 40, "max": 20 })).unwrap();
        assert!(eta.validate().is_err());

        let eta: DeliveryEtaBody =
            serde_json::from_value(json!({ "min": 20, "max": 20 })).unwrap();
        assert!(eta.validate().is_ok());
    }

    #[test]
    fn zip_must_be_at_least_three_characters() {
        let address: AddressBody = serde_json::from_value(json!({
            "line1": "12 MG Road",
            "city": "Pune",
            "zip": "41"
        }))
        .unwrap();
        assert!(address.validate().is_err());
    }

    #[test]
    fn blank_patch_description_is_dropped_not_emptied() {
        let patch: PatchRestaurantRequest =
            serde_json::from_value(json!({ "description": "   " })).unwrap();
        let (_, update) = patch.into_update();
        assert_eq!(update.description, None);
    }
}
