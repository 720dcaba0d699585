//! Startup schema definition
//!
//! Tables stay schemaless; only the indexes carry semantics. The unique
//! slug index is the backstop behind the slug allocator, and the search
//! indexes back the `q` free-text filter.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// `DEFINE` statements applied at startup. All are idempotent
/// (`IF NOT EXISTS`), so restarts are safe.
const DEFINITIONS: &[&str] = &[
    // Restaurants
    "DEFINE TABLE IF NOT EXISTS restaurant SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS uniq_restaurant_slug ON restaurant FIELDS slug UNIQUE",
    "DEFINE INDEX IF NOT EXISTS idx_restaurant_city_open ON restaurant FIELDS address.city, is_open",
    "DEFINE INDEX IF NOT EXISTS idx_restaurant_cuisines ON restaurant FIELDS cuisines",
    "DEFINE INDEX IF NOT EXISTS idx_restaurant_tags ON restaurant FIELDS tags",
    // Menu items
    "DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS idx_menu_item_scope ON menu_item FIELDS restaurant, category, is_archived",
    "DEFINE INDEX IF NOT EXISTS idx_menu_item_flags ON menu_item FIELDS is_veg, is_available",
    // Free-text search
    "DEFINE ANALYZER IF NOT EXISTS catalog_text TOKENIZERS class FILTERS lowercase, ascii",
    "DEFINE INDEX IF NOT EXISTS ft_restaurant_name ON restaurant FIELDS name SEARCH ANALYZER catalog_text BM25",
    "DEFINE INDEX IF NOT EXISTS ft_restaurant_description ON restaurant FIELDS description SEARCH ANALYZER catalog_text BM25",
    "DEFINE INDEX IF NOT EXISTS ft_restaurant_cuisines ON restaurant FIELDS cuisines SEARCH ANALYZER catalog_text BM25",
    "DEFINE INDEX IF NOT EXISTS ft_restaurant_tags ON restaurant FIELDS tags SEARCH ANALYZER catalog_text BM25",
    "DEFINE INDEX IF NOT EXISTS ft_menu_item_name ON menu_item FIELDS name SEARCH ANALYZER catalog_text BM25",
    "DEFINE INDEX IF NOT EXISTS ft_menu_item_description ON menu_item FIELDS description SEARCH ANALYZER catalog_text BM25",
    "DEFINE INDEX IF NOT EXISTS ft_menu_item_tags ON menu_item FIELDS tags SEARCH ANALYZER catalog_text BM25",
    "DEFINE INDEX IF NOT EXISTS ft_menu_item_category ON menu_item FIELDS category SEARCH ANALYZER catalog_text BM25",
];

/// Apply every schema definition
pub async fn define(db: &Surreal<Db>) -> surrealdb::Result<()> {
    for statement in DEFINITIONS {
        db.query(*statement).await?.check()?;
    }
    Ok(())
}
