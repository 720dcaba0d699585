//! Menu Item Repository

use chrono::Utc;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, bind_clause};
use crate::db::filter::{MenuItemFilter, MenuItemSort, SortOrder};
use crate::db::models::{MenuItem, MenuItemUpdate};
use crate::utils::query::PageWindow;

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Filtered page plus total count, fetched concurrently
    pub async fn find(
        &self,
        filter: &MenuItemFilter,
        sort: MenuItemSort,
        order: SortOrder,
        window: &PageWindow,
    ) -> RepoResult<(Vec<MenuItem>, usize)> {
        let clause = filter.to_where();

        let select = format!(
            "SELECT * FROM {TABLE} WHERE {} ORDER BY {} LIMIT $limit START $start",
            clause.clause,
            sort.order_by(order)
        );
        let count = format!(
            "SELECT count() FROM {TABLE} WHERE {} GROUP ALL",
            clause.clause
        );

        let page_fut = async {
            let mut query = self
                .base
                .db()
                .query(&select)
                .bind(("limit", window.page_size as i64))
                .bind(("start", window.start as i64));
            query = bind_clause(query, &clause);
            let rows: Vec<MenuItem> = query.await?.take(0)?;
            Ok::<_, RepoError>(rows)
        };
        let count_fut = async {
            let mut query = self.base.db().query(&count);
            query = bind_clause(query, &clause);
            let rows: Vec<CountRow> = query.await?.take(0)?;
            Ok::<_, RepoError>(rows.into_iter().next().map(|r| r.count).unwrap_or(0))
        };

        let (rows, total) = tokio::try_join!(page_fut, count_fut)?;
        Ok((rows, total))
    }

    /// Fetch by id; archived records are invisible
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<MenuItem>> {
        let rows: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM $thing WHERE is_archived = false")
            .bind(("thing", id.clone()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn create(&self, item: MenuItem) -> RepoResult<MenuItem> {
        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Partial update scoped to the owning restaurant; only present fields
    /// are written, plus `updated_at`. Archived items cannot be updated.
    pub async fn update_set(
        &self,
        id: &RecordId,
        restaurant: &RecordId,
        data: MenuItemUpdate,
    ) -> RepoResult<MenuItem> {
        if data.is_empty() {
            return Err(RepoError::Validation("Update set is empty".to_string()));
        }

        // Build dynamic SET clauses
        let mut set_parts: Vec<&str> = vec!["updated_at = $updated_at"];
        if data.name.is_some() { set_parts.push("name = $name"); }
        if data.description.is_some() { set_parts.push("description = $description"); }
        if data.price.is_some() { set_parts.push("price = $price"); }
        if data.currency.is_some() { set_parts.push("currency = $currency"); }
        if data.category.is_some() { set_parts.push("category = $category"); }
        if data.tags.is_some() { set_parts.push("tags = $tags"); }
        if data.image_url.is_some() { set_parts.push("image_url = $image_url"); }
        if data.is_veg.is_some() { set_parts.push("is_veg = $is_veg"); }
        if data.is_available.is_some() { set_parts.push("is_available = $is_available"); }
        if data.spice_level.is_some() { set_parts.push("spice_level = $spice_level"); }
        if data.addons.is_some() { set_parts.push("addons = $addons"); }
        if data.calories.is_some() { set_parts.push("calories = $calories"); }

        let query_str = format!(
            "UPDATE {TABLE} SET {} \
             WHERE id = $id AND restaurant = $restaurant AND is_archived = false \
             RETURN AFTER",
            set_parts.join(", ")
        );
        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("id", id.clone()))
            .bind(("restaurant", restaurant.clone()))
            .bind(("updated_at", Utc::now()));

        // Bind each field
        if let Some(v) = data.name { query = query.bind(("name", v)); }
        if let Some(v) = data.description { query = query.bind(("description", v)); }
        if let Some(v) = data.price { query = query.bind(("price", v)); }
        if let Some(v) = data.currency { query = query.bind(("currency", v)); }
        if let Some(v) = data.category { query = query.bind(("category", v)); }
        if let Some(v) = data.tags { query = query.bind(("tags", v)); }
        if let Some(v) = data.image_url { query = query.bind(("image_url", v)); }
        if let Some(v) = data.is_veg { query = query.bind(("is_veg", v)); }
        if let Some(v) = data.is_available { query = query.bind(("is_available", v)); }
        if let Some(v) = data.spice_level { query = query.bind(("spice_level", v)); }
        if let Some(v) = data.addons { query = query.bind(("addons", v)); }
        if let Some(v) = data.calories { query = query.bind(("calories", v)); }

        let updated: Vec<MenuItem> = query.await?.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
    }

    /// Soft delete scoped to the owning restaurant. Returns false when the
    /// item is missing, owned elsewhere, or already archived, so a repeat
    /// call reports not-found instead of succeeding twice.
    pub async fn archive(&self, id: &RecordId, restaurant: &RecordId) -> RepoResult<bool> {
        let rows: Vec<MenuItem> = self
            .base
            .db()
            .query(format!(
                "UPDATE {TABLE} \
                 SET is_archived = true, is_available = false, updated_at = $updated_at \
                 WHERE id = $id AND restaurant = $restaurant AND is_archived = false \
                 RETURN AFTER"
            ))
            .bind(("id", id.clone()))
            .bind(("restaurant", restaurant.clone()))
            .bind(("updated_at", Utc::now()))
            .await?
            .take(0)?;
        Ok(!rows.is_empty())
    }
}
