//! Catalog service
//!
//! Owns the repositories and the write paths that need slug allocation.
//! The unique slug index can still fail a write that passed the probe
//! (two writers racing); those paths re-allocate and retry a bounded
//! number of times before giving up with a conflict.

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{MenuItem, Restaurant, RestaurantUpdate};
use crate::db::repository::{MenuItemRepository, RepoError, RestaurantRepository};
use crate::services::slug::{MAX_ALLOC_ATTEMPTS, SlugAllocator};
use crate::utils::{AppError, AppResult};

const RESTAURANT_TABLE: &str = "restaurant";
const MENU_ITEM_TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct CatalogService {
    restaurants: RestaurantRepository,
    menu_items: MenuItemRepository,
    slugs: SlugAllocator,
}

impl CatalogService {
    pub fn new(db: Surreal<Db>) -> Self {
        let restaurants = RestaurantRepository::new(db.clone());
        let slugs = SlugAllocator::new(restaurants.clone());
        Self {
            restaurants,
            menu_items: MenuItemRepository::new(db),
            slugs,
        }
    }

    pub fn restaurants(&self) -> &RestaurantRepository {
        &self.restaurants
    }

    pub fn menu_items(&self) -> &MenuItemRepository {
        &self.menu_items
    }

    /// Resolve a path identifier to a live restaurant.
    ///
    /// An identifier that parses as a restaurant record id is looked up by
    /// id; anything else is treated as a slug (lowercased). Archived
    /// restaurants resolve to 404 either way.
    pub async fn resolve_restaurant(&self, id_or_slug: &str) -> AppResult<Restaurant> {
        let found = match parse_record_id(RESTAURANT_TABLE, id_or_slug) {
            Some(id) => self.restaurants.find_by_id(&id).await?,
            None => {
                self.restaurants
                    .find_by_slug(&id_or_slug.to_lowercase())
                    .await?
            }
        };
        found.ok_or_else(|| AppError::not_found(format!("Restaurant '{id_or_slug}' not found")))
    }

    /// Create a restaurant, allocating its slug from `slug_hint`.
    pub async fn create_restaurant(
        &self,
        slug_hint: &str,
        mut record: Restaurant,
    ) -> AppResult<Restaurant> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            record.slug = self.slugs.allocate(slug_hint, None).await?;
            match self.restaurants.create(record.clone()).await {
                Ok(created) => return Ok(created),
                Err(RepoError::Duplicate(msg)) => {
                    if attempt >= MAX_ALLOC_ATTEMPTS {
                        return Err(AppError::conflict(msg));
                    }
                    tracing::warn!(
                        slug = %record.slug,
                        attempt,
                        "Lost slug race on create, re-allocating"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Partially update a restaurant. When `slug_hint` is set the slug is
    /// re-allocated, excluding the record itself so a no-op rename keeps
    /// the current slug.
    pub async fn update_restaurant(
        &self,
        id_or_slug: &str,
        slug_hint: Option<&str>,
        mut update: RestaurantUpdate,
    ) -> AppResult<Restaurant> {
        let existing = self.resolve_restaurant(id_or_slug).await?;
        let id = existing
            .id
            .ok_or_else(|| AppError::internal("Restaurant record has no id"))?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            if let Some(hint) = slug_hint {
                update.slug = Some(self.slugs.allocate(hint, Some(&id)).await?);
            }
            match self.restaurants.update_set(&id, update.clone()).await {
                Ok(updated) => return Ok(updated),
                Err(RepoError::Duplicate(msg)) => {
                    if slug_hint.is_none() || attempt >= MAX_ALLOC_ATTEMPTS {
                        return Err(AppError::conflict(msg));
                    }
                    tracing::warn!(attempt, "Lost slug race on rename, re-allocating");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub async fn create_menu_item(&self, item: MenuItem) -> AppResult<MenuItem> {
        Ok(self.menu_items.create(item).await?)
    }
}

/// Parse `raw` as a full-form `table:key` record id.
///
/// Only the full form counts; a bare string is a slug candidate, not an
/// id, so single-word slugs never shadow record lookups.
pub fn parse_record_id(table: &str, raw: &str) -> Option<RecordId> {
    let (prefix, key) = raw.split_once(':')?;
    if prefix != table || key.is_empty() {
        return None;
    }
    raw.parse::<RecordId>().ok()
}

/// Parse a menu item path identifier, rejecting anything that cannot be a
/// record id before the store is consulted. Menu items have no slugs, so
/// the bare key form is accepted as well.
pub fn parse_menu_item_id(raw: &str) -> AppResult<RecordId> {
    let parsed = if raw.contains(':') {
        parse_record_id(MENU_ITEM_TABLE, raw)
    } else if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(RecordId::from_table_key(MENU_ITEM_TABLE, raw))
    } else {
        None
    };
    parsed.ok_or_else(|| AppError::invalid_identifier(format!("Invalid menu item id '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::{parse_menu_item_id, parse_record_id};

    #[test]
    fn full_form_must_name_the_right_table() {
        assert!(parse_record_id("restaurant", "restaurant:abc123").is_some());
        assert!(parse_record_id("restaurant", "menu_item:abc123").is_none());
        assert!(parse_record_id("restaurant", "restaurant:").is_none());
    }

    #[test]
    fn bare_strings_are_slug_candidates_not_ids() {
        assert!(parse_record_id("restaurant", "tasty-bites").is_none());
        assert!(parse_record_id("restaurant", "tastybites").is_none());
        assert!(parse_record_id("restaurant", "").is_none());
    }

    #[test]
    fn menu_item_ids_accept_the_bare_key_form() {
        let id = parse_menu_item_id("k9s8d7f6").unwrap();
        assert_eq!(id.to_string(), "menu_item:k9s8d7f6");
    }

    #[test]
    fn menu_item_id_parse_failure_is_a_client_error() {
        assert!(parse_menu_item_id("menu_item:abc").is_ok());
        assert!(parse_menu_item_id("not a key!").is_err());
        assert!(parse_menu_item_id("restaurant:abc").is_err());
    }
}
