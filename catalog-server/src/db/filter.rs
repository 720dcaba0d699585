//! Filter building
//!
//! Pure translation from validated query parameters into a SurrealQL WHERE
//! clause plus named bindings. No I/O happens here; the repositories attach
//! the produced clause to their queries.
//!
//! Every filter starts from the baseline `is_archived = false` — archived
//! records are invisible to every read path, there is no "show archived"
//! mode.

use serde_json::Value;

/// A rendered WHERE clause and its bindings
#[derive(Debug, Clone)]
pub struct WhereClause {
    pub clause: String,
    pub bindings: Vec<(String, Value)>,
}

/// Accumulates conditions and bindings
///
/// Conditions are joined with `AND`; values are always passed as bindings,
/// never interpolated, so caller input cannot reach the query text.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    bindings: Vec<(String, Value)>,
}

impl FilterBuilder {
    /// Builder seeded with the soft-delete baseline
    pub fn active() -> Self {
        let mut builder = Self::default();
        builder.conditions.push("is_archived = false".into());
        builder
    }

    fn bind(&mut self, param: &str, value: impl Into<Value>) {
        self.bindings.push((param.to_string(), value.into()));
    }

    /// Case-insensitive exact match: `string::lowercase(field) = $param`
    pub fn eq_lower(&mut self, field: &str, param: &str, value: &str) {
        self.conditions
            .push(format!("string::lowercase({field}) = ${param}"));
        self.bind(param, value.to_lowercase());
    }

    /// Case-insensitive membership: matches when any entry of the stored
    /// array equals any of the supplied values
    pub fn any_lower(&mut self, field: &str, param: &str, values: &[String]) {
        self.conditions.push(format!(
            "array::map({field}, |$v| string::lowercase($v)) CONTAINSANY ${param}"
        ));
        let lowered: Vec<Value> = values
            .iter()
            .map(|v| Value::from(v.to_lowercase()))
            .collect();
        self.bind(param, lowered);
    }

    pub fn gte(&mut self, field: &str, param: &str, value: f64) {
        self.conditions.push(format!("{field} >= ${param}"));
        self.bind(param, value);
    }

    pub fn lte(&mut self, field: &str, param: &str, value: f64) {
        self.conditions.push(format!("{field} <= ${param}"));
        self.bind(param, value);
    }

    pub fn eq_bool(&mut self, field: &str, param: &str, value: bool) {
        self.conditions.push(format!("{field} = ${param}"));
        self.bind(param, value);
    }

    /// Record-link equality; the key is bound as a string and converted
    /// with `type::thing` inside the store
    pub fn eq_record(&mut self, field: &str, param: &str, table: &str, key: &str) {
        self.conditions
            .push(format!("{field} = type::thing('{table}', ${param})"));
        self.bind(param, key.to_string());
    }

    /// Full-text search over the search-indexed fields
    pub fn search(&mut self, fields: &[&str], param: &str, value: &str) {
        let any = fields
            .iter()
            .map(|f| format!("{f} @@ ${param}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.conditions.push(format!("({any})"));
        self.bind(param, value.to_string());
    }

    pub fn build(self) -> WhereClause {
        WhereClause {
            clause: self.conditions.join(" AND "),
            bindings: self.bindings,
        }
    }
}

// =============================================================================
// Restaurant filter
// =============================================================================

/// Validated restaurant list filter
#[derive(Debug, Clone, Default)]
pub struct RestaurantFilter {
    pub city: Option<String>,
    /// Already split, trimmed, non-empty
    pub cuisines: Vec<String>,
    pub tags: Vec<String>,
    pub is_open: Option<bool>,
    pub min_rating: Option<f64>,
    pub q: Option<String>,
}

impl RestaurantFilter {
    pub fn to_where(&self) -> WhereClause {
        let mut builder = FilterBuilder::active();

        if let Some(city) = &self.city {
            builder.eq_lower("address.city", "city", city);
        }
        if !self.cuisines.is_empty() {
            builder.any_lower("cuisines", "cuisines", &self.cuisines);
        }
        if !self.tags.is_empty() {
            builder.any_lower("tags", "tags", &self.tags);
        }
        if let Some(is_open) = self.is_open {
            builder.eq_bool("is_open", "is_open", is_open);
        }
        if let Some(min_rating) = self.min_rating {
            builder.gte("rating", "min_rating", min_rating);
        }
        if let Some(q) = &self.q {
            builder.search(&["name", "description", "cuisines", "tags"], "q", q);
        }

        builder.build()
    }
}

/// Restaurant sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestaurantSort {
    Rating,
    DeliveryEta,
    Cost,
    #[default]
    Name,
}

impl RestaurantSort {
    pub fn order_by(self) -> &'static str {
        match self {
            Self::Rating => "rating DESC, review_count DESC",
            Self::DeliveryEta => "delivery_eta_mins.min ASC",
            Self::Cost => "avg_cost_for_two ASC",
            Self::Name => "name ASC",
        }
    }
}

// =============================================================================
// Menu item filter
// =============================================================================

/// Validated menu item list filter
#[derive(Debug, Clone, Default)]
pub struct MenuItemFilter {
    /// Record key of the owning restaurant (already validated)
    pub restaurant_key: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub q: Option<String>,
}

impl MenuItemFilter {
    pub fn to_where(&self) -> WhereClause {
        let mut builder = FilterBuilder::active();

        if let Some(key) = &self.restaurant_key {
            builder.eq_record("restaurant", "restaurant", "restaurant", key);
        }
        if let Some(category) = &self.category {
            builder.eq_lower("category", "category", category);
        }
        if !self.tags.is_empty() {
            builder.any_lower("tags", "tags", &self.tags);
        }
        if let Some(is_veg) = self.is_veg {
            builder.eq_bool("is_veg", "is_veg", is_veg);
        }
        if let Some(is_available) = self.is_available {
            builder.eq_bool("is_available", "is_available", is_available);
        }
        if let Some(min_price) = self.min_price {
            builder.gte("price", "min_price", min_price);
        }
        if let Some(max_price) = self.max_price {
            builder.lte("price", "max_price", max_price);
        }
        if let Some(q) = &self.q {
            builder.search(&["name", "description", "tags", "category"], "q", q);
        }

        builder.build()
    }
}

/// Menu item sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuItemSort {
    Price,
    CreatedAt,
    #[default]
    Name,
}

/// Sort direction (menu item lists only; restaurant sorts are fixed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl MenuItemSort {
    pub fn order_by(self, order: SortOrder) -> String {
        let direction = match order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        let field = match self {
            Self::Price => "price",
            Self::CreatedAt => "created_at",
            Self::Name => "name",
        };
        format!("{field} {direction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_always_present() {
        let clause = RestaurantFilter::default().to_where();
        assert_eq!(clause.clause, "is_archived = false");
        assert!(clause.bindings.is_empty());
    }

    #[test]
    fn restaurant_filter_adds_only_supplied_predicates() {
        let filter = RestaurantFilter {
            city: Some("Pune".into()),
            cuisines: vec!["Thai".into(), "Chinese".into()],
            min_rating: Some(4.0),
            ..Default::default()
        };
        let clause = filter.to_where();

        assert!(clause.clause.starts_with("is_archived = false AND "));
        assert!(
            clause
                .clause
                .contains("string::lowercase(address.city) = $city")
        );
        assert!(clause.clause.contains("CONTAINSANY $cuisines"));
        assert!(clause.clause.contains("rating >= $min_rating"));
        assert!(!clause.clause.contains("is_open"));
        assert!(!clause.clause.contains("$tags"));

        // City and membership values are lowercased before binding
        let city = clause.bindings.iter().find(|(k, _)| k == "city").unwrap();
        assert_eq!(city.1, serde_json::json!("pune"));
        let cuisines = clause
            .bindings
            .iter()
            .find(|(k, _)| k == "cuisines")
            .unwrap();
        assert_eq!(cuisines.1, serde_json::json!(["thai", "chinese"]));
    }

    #[test]
    fn menu_item_filter_emits_independent_price_bounds() {
        let filter = MenuItemFilter {
            min_price: Some(100.0),
            ..Default::default()
        };
        let clause = filter.to_where();
        assert!(clause.clause.contains("price >= $min_price"));
        assert!(!clause.clause.contains("price <= $max_price"));

        let filter = MenuItemFilter {
            max_price: Some(500.0),
            ..Default::default()
        };
        let clause = filter.to_where();
        assert!(!clause.clause.contains("price >= $min_price"));
        assert!(clause.clause.contains("price <= $max_price"));
    }

    #[test]
    fn boolean_predicates_require_explicit_values() {
        let clause = MenuItemFilter::default().to_where();
        assert!(!clause.clause.contains("is_veg"));
        assert!(!clause.clause.contains("is_available"));

        let filter = MenuItemFilter {
            is_veg: Some(false),
            ..Default::default()
        };
        let clause = filter.to_where();
        assert!(clause.clause.contains("is_veg = $is_veg"));
        let bound = clause.bindings.iter().find(|(k, _)| k == "is_veg").unwrap();
        assert_eq!(bound.1, serde_json::json!(false));
    }

    #[test]
    fn free_text_search_covers_all_indexed_fields() {
        let filter = MenuItemFilter {
            q: Some("paneer".into()),
            ..Default::default()
        };
        let clause = filter.to_where();
        assert!(clause.clause.contains("name @@ $q"));
        assert!(clause.clause.contains("category @@ $q"));
    }

    #[test]
    fn restaurant_scope_binds_the_key_only() {
        let filter = MenuItemFilter {
            restaurant_key: Some("abc123".into()),
            ..Default::default()
        };
        let clause = filter.to_where();
        assert!(
            clause
                .clause
                .contains("restaurant = type::thing('restaurant', $restaurant)")
        );
        let bound = clause
            .bindings
            .iter()
            .find(|(k, _)| k == "restaurant")
            .unwrap();
        assert_eq!(bound.1, serde_json::json!("abc123"));
    }

    #[test]
    fn menu_item_sort_renders_field_and_direction() {
        assert_eq!(
            MenuItemSort::Price.order_by(SortOrder::Desc),
            "price DESC"
        );
        assert_eq!(MenuItemSort::Name.order_by(SortOrder::Asc), "name ASC");
        assert_eq!(
            MenuItemSort::CreatedAt.order_by(SortOrder::Desc),
            "created_at DESC"
        );
    }

    #[test]
    fn restaurant_sort_keys() {
        assert_eq!(
            RestaurantSort::Rating.order_by(),
            "rating DESC, review_count DESC"
        );
        assert_eq!(RestaurantSort::default().order_by(), "name ASC");
    }
}
