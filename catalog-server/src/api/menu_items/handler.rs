//! Menu item API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use surrealdb::RecordId;
use validator::{Validate, ValidationError};

use shared::Paginated;

use crate::api::convert::{DataEnvelope, MenuItemDto};
use crate::api::extract::Json;
use crate::auth::AuthUser;
use crate::core::ServerState;
use crate::db::filter::{MenuItemFilter, MenuItemSort, SortOrder};
use crate::db::models::{Addon, MenuItem, MenuItemUpdate, SpiceLevel};
use crate::services::catalog::{parse_menu_item_id, parse_record_id};
use crate::utils::query::{PageWindow, sanitize_list, split_csv, trimmed};
use crate::utils::{AppError, AppResult, format_validation_errors};

// ========== Query / body schemas ==========

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListMenuItemsQuery {
    pub page: Option<u32>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub limit: Option<u32>,
    /// Top-level list only; the nested route scopes by path
    pub restaurant_id: Option<String>,
    pub category: Option<String>,
    /// Comma-separated
    pub tags: Option<String>,
    pub q: Option<String>,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub max_price: Option<f64>,
    /// price | createdAt | name
    pub sort: Option<String>,
    /// asc | desc
    pub order: Option<String>,
}

fn validate_currency(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new("currency")
            .with_message("must be a 3-letter currency code".into()));
    }
    Ok(())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddonBody {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_default: bool,
}

impl From<AddonBody> for Addon {
    fn from(a: AddonBody) -> Self {
        Self {
            name: a.name.trim().to_string(),
            price: a.price,
            is_default: a.is_default,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    #[validate(length(min = 1, max = 160, message = "must be 1-160 characters"))]
    pub name: String,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub price: f64,
    #[validate(custom(function = "validate_currency"))]
    pub currency: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
    pub spice_level: Option<SpiceLevel>,
    #[validate(nested)]
    #[serde(default)]
    pub addons: Vec<AddonBody>,
    pub calories: Option<u32>,
}

impl CreateMenuItemRequest {
    fn into_record(self, restaurant: RecordId) -> MenuItem {
        let now = Utc::now();
        MenuItem {
            id: None,
            restaurant,
            name: self.name.trim().to_string(),
            description: trimmed(self.description),
            price: self.price,
            currency: self
                .currency
                .map(|c| c.trim().to_uppercase())
                .unwrap_or_else(|| "INR".to_string()),
            category: trimmed(self.category),
            tags: sanitize_list(self.tags),
            image_url: self.image_url,
            is_veg: self.is_veg.unwrap_or(true),
            is_available: self.is_available.unwrap_or(true),
            is_archived: false,
            spice_level: self.spice_level,
            addons: self.addons.into_iter().map(Into::into).collect(),
            calories: self.calories,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatchMenuItemRequest {
    #[validate(length(min = 1, max = 160, message = "must be 1-160 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub price: Option<f64>,
    #[validate(custom(function = "validate_currency"))]
    pub currency: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
    pub spice_level: Option<SpiceLevel>,
    #[validate(nested)]
    pub addons: Option<Vec<AddonBody>>,
    pub calories: Option<u32>,
}

impl PatchMenuItemRequest {
    fn is_empty(&self) -> bool {
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

    fn into_update(self) -> MenuItemUpdate {
        MenuItemUpdate {
            name: self.name.map(|n| n.trim().to_string()),
            description: trimmed(self.description),
            price: self.price,
            currency: self.currency.map(|c| c.trim().to_uppercase()),
            category: trimmed(self.category),
            tags: self.tags.map(sanitize_list),
            image_url: self.image_url,
            is_veg: self.is_veg,
            is_available: self.is_available,
            spice_level: self.spice_level,
            addons: self
                .addons
                .map(|addons| addons.into_iter().map(Into::into).collect()),
            calories: self.calories,
        }
    }
}

fn parse_sort(raw: Option<&str>) -> AppResult<MenuItemSort> {
    match raw {
        None | Some("name") => Ok(MenuItemSort::Name),
        Some("price") => Ok(MenuItemSort::Price),
        Some("createdAt") => Ok(MenuItemSort::CreatedAt),
        Some(other) => Err(AppError::validation(format!(
            "sort: unknown value '{other}'"
        ))),
    }
}

fn parse_order(raw: Option<&str>) -> AppResult<SortOrder> {
    match raw {
        None | Some("asc") => Ok(SortOrder::Asc),
        Some("desc") => Ok(SortOrder::Desc),
        Some(other) => Err(AppError::validation(format!(
            "order: unknown value '{other}'"
        ))),
    }
}

impl ListMenuItemsQuery {
    fn into_filter(self, restaurant_key: Option<String>) -> MenuItemFilter {
        MenuItemFilter {
            restaurant_key,
            category: trimmed(self.category),
            tags: split_csv(self.tags.as_deref()),
            q: trimmed(self.q),
            is_veg: self.is_veg,
            is_available: self.is_available,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

async fn run_list(
    state: &ServerState,
    query: ListMenuItemsQuery,
    restaurant_key: Option<String>,
) -> AppResult<Json<Paginated<MenuItemDto>>> {
    query
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;
    let sort = parse_sort(query.sort.as_deref())?;
    let order = parse_order(query.order.as_deref())?;
    let window = PageWindow::resolve(query.page, query.limit, &state.config);

    let filter = query.into_filter(restaurant_key);
    let (rows, total) = state
        .catalog
        .menu_items()
        .find(&filter, sort, order, &window)
        .await?;
    let data = rows.into_iter().map(MenuItemDto::from).collect();
    Ok(Json(Paginated::new(
        data,
        window.page,
        window.page_size,
        total as u64,
    )))
}

// ========== Handlers ==========

/// GET /menu-items - cross-restaurant list, optional restaurantId filter
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListMenuItemsQuery>,
) -> AppResult<Json<Paginated<MenuItemDto>>> {
    let restaurant_key = match query.restaurant_id.as_deref() {
        Some(raw) => {
            let id = parse_record_id("restaurant", raw).ok_or_else(|| {
                AppError::invalid_identifier(format!("Invalid restaurantId '{raw}'"))
            })?;
            Some(id.key().to_string())
        }
        None => None,
    };
    run_list(&state, query, restaurant_key).await
}

/// GET /menu-items/:menu_item_id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(menu_item_id): Path<String>,
) -> AppResult<Json<DataEnvelope<MenuItemDto>>> {
    let id = parse_menu_item_id(&menu_item_id)?;
    let item = state
        .catalog
        .menu_items()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item '{menu_item_id}' not found")))?;
    Ok(Json(DataEnvelope::new(item.into())))
}

/// GET /restaurants/:id_or_slug/menu-items - scoped list
pub async fn list_for_restaurant(
    State(state): State<ServerState>,
    Path(id_or_slug): Path<String>,
    Query(query): Query<ListMenuItemsQuery>,
) -> AppResult<Json<Paginated<MenuItemDto>>> {
    let restaurant = state.catalog.resolve_restaurant(&id_or_slug).await?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant record has no id"))?;
    run_list(&state, query, Some(restaurant_id.key().to_string())).await
}

/// POST /restaurants/:id_or_slug/menu-items
pub async fn create(
    State(state): State<ServerState>,
    user: AuthUser,
    Path(id_or_slug): Path<String>,
    Json(payload): Json<CreateMenuItemRequest>,
) -> AppResult<(StatusCode, Json<DataEnvelope<MenuItemDto>>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

    let restaurant = state.catalog.resolve_restaurant(&id_or_slug).await?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant record has no id"))?;

    let created = state
        .catalog
        .create_menu_item(payload.into_record(restaurant_id))
        .await?;
    tracing::info!(
        target: "catalog",
        user = %user.sub,
        item = %created.name,
        "Menu item created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataEnvelope::new(created.into())),
    ))
}

/// PATCH /restaurants/:id_or_slug/menu-items/:menu_item_id
pub async fn update(
    State(state): State<ServerState>,
    user: AuthUser,
    Path((id_or_slug, menu_item_id)): Path<(String, String)>,
    Json(payload): Json<PatchMenuItemRequest>,
) -> AppResult<Json<DataEnvelope<MenuItemDto>>> {
    // Identifier syntax is checked before any store access
    let item_id = parse_menu_item_id(&menu_item_id)?;
    payload
        .validate()
        .map_err(|e| AppError::validation(format_validation_errors(&e)))?;
    if payload.is_empty() {
        return Err(AppError::validation(
            "At least one field must be provided",
        ));
    }

    let restaurant = state.catalog.resolve_restaurant(&id_or_slug).await?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant record has no id"))?;

    let updated = state
        .catalog
        .menu_items()
        .update_set(&item_id, &restaurant_id, payload.into_update())
        .await?;
    tracing::info!(
        target: "catalog",
        user = %user.sub,
        item = %updated.name,
        "Menu item updated"
    );
    Ok(Json(DataEnvelope::new(updated.into())))
}

/// DELETE /restaurants/:id_or_slug/menu-items/:menu_item_id - soft delete.
/// A second call finds nothing live to archive and reports 404.
pub async fn archive(
    State(state): State<ServerState>,
    user: AuthUser,
    Path((id_or_slug, menu_item_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let item_id = parse_menu_item_id(&menu_item_id)?;
    let restaurant = state.catalog.resolve_restaurant(&id_or_slug).await?;
    let restaurant_id = restaurant
        .id
        .ok_or_else(|| AppError::internal("Restaurant record has no id"))?;

    let archived = state
        .catalog
        .menu_items()
        .archive(&item_id, &restaurant_id)
        .await?;
    if !archived {
        return Err(AppError::not_found(format!(
            "Menu item '{menu_item_id}' not found"
        )));
    }
    tracing::info!(
        target: "catalog",
        user = %user.sub,
        item = %menu_item_id,
        "Menu item archived"
    );
    Ok(StatusCode::NO_CONTENT)
}
