//! Restaurant Repository

use chrono::Utc;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, CountRow, RepoError, RepoResult, bind_clause};
use crate::db::filter::{RestaurantFilter, RestaurantSort};
use crate::db::models::{Restaurant, RestaurantUpdate};
use crate::utils::query::PageWindow;

const TABLE: &str = "restaurant";

/// Row shape for slug probes
#[derive(Debug, serde::Deserialize)]
struct IdRow {
    id: RecordId,
}

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Filtered page plus total count, fetched concurrently
    pub async fn find(
        &self,
        filter: &RestaurantFilter,
        sort: RestaurantSort,
        window: &PageWindow,
    ) -> RepoResult<(Vec<Restaurant>, usize)> {
        let clause = filter.to_where();

        let select = format!(
            "SELECT * FROM {TABLE} WHERE {} ORDER BY {} LIMIT $limit START $start",
            clause.clause,
            sort.order_by()
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
            let rows: Vec<Restaurant> = query.await?.take(0)?;
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
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Restaurant>> {
        let rows: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * FROM $thing WHERE is_archived = false")
            .bind(("thing", id.clone()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Fetch by slug; archived records are invisible
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Restaurant>> {
        let rows: Vec<Restaurant> = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM {TABLE} WHERE slug = $slug AND is_archived = false LIMIT 1"
            ))
            .bind(("slug", slug.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Whether `slug` is already held by some other record.
    ///
    /// Archived records count; an archived restaurant keeps its slug
    /// reserved. `exclude` is the record being renamed, which may keep
    /// its own slug.
    pub async fn slug_taken(&self, slug: &str, exclude: Option<&RecordId>) -> RepoResult<bool> {
        let rows: Vec<IdRow> = self
            .base
            .db()
            .query(format!(
                "SELECT id FROM {TABLE} WHERE slug = $slug LIMIT 1"
            ))
            .bind(("slug", slug.to_string()))
            .await?
            .take(0)?;

        Ok(match rows.into_iter().next() {
            Some(row) => exclude != Some(&row.id),
            None => false,
        })
    }

    pub async fn create(&self, restaurant: Restaurant) -> RepoResult<Restaurant> {
        let created: Option<Restaurant> = self.base.db().create(TABLE).content(restaurant).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Partial update; only present fields are written, plus `updated_at`.
    /// Archived records cannot be updated.
    pub async fn update_set(&self, id: &RecordId, data: RestaurantUpdate) -> RepoResult<Restaurant> {
        if data.is_empty() {
            return Err(RepoError::Validation("Update set is empty".to_string()));
        }

        // Build dynamic SET clauses
        let mut set_parts: Vec<&str> = vec!["updated_at = $updated_at"];
        if data.name.is_some() { set_parts.push("name = $name"); }
        if data.slug.is_some() { set_parts.push("slug = $slug"); }
        if data.description.is_some() { set_parts.push("description = $description"); }
        if data.cuisines.is_some() { set_parts.push("cuisines = $cuisines"); }
        if data.tags.is_some() { set_parts.push("tags = $tags"); }
        if data.image_url.is_some() { set_parts.push("image_url = $image_url"); }
        if data.avg_cost_for_two.is_some() { set_parts.push("avg_cost_for_two = $avg_cost_for_two"); }
        if data.rating.is_some() { set_parts.push("rating = $rating"); }
        if data.review_count.is_some() { set_parts.push("review_count = $review_count"); }
        if data.is_open.is_some() { set_parts.push("is_open = $is_open"); }
        if data.delivery_eta_mins.is_some() { set_parts.push("delivery_eta_mins = $delivery_eta_mins"); }
        if data.address.is_some() { set_parts.push("address = $address"); }

        let query_str = format!(
            "UPDATE {TABLE} SET {} WHERE id = $id AND is_archived = false RETURN AFTER",
            set_parts.join(", ")
        );
        let mut query = self
            .base
            .db()
            .query(&query_str)
            .bind(("id", id.clone()))
            .bind(("updated_at", Utc::now()));

        // Bind each field
        if let Some(v) = data.name { query = query.bind(("name", v)); }
        if let Some(v) = data.slug { query = query.bind(("slug", v)); }
        if let Some(v) = data.description { query = query.bind(("description", v)); }
        if let Some(v) = data.cuisines { query = query.bind(("cuisines", v)); }
        if let Some(v) = data.tags { query = query.bind(("tags", v)); }
        if let Some(v) = data.image_url { query = query.bind(("image_url", v)); }
        if let Some(v) = data.avg_cost_for_two { query = query.bind(("avg_cost_for_two", v)); }
        if let Some(v) = data.rating { query = query.bind(("rating", v)); }
        if let Some(v) = data.review_count { query = query.bind(("review_count", v)); }
        if let Some(v) = data.is_open { query = query.bind(("is_open", v)); }
        if let Some(v) = data.delivery_eta_mins { query = query.bind(("delivery_eta_mins", v)); }
        if let Some(v) = data.address { query = query.bind(("address", v)); }

        let updated: Vec<Restaurant> = query.await?.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
    }
}
