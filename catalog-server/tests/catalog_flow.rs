//! Catalog flow tests against the in-memory engine
//! Run: cargo test -p catalog-server --test catalog_flow

use chrono::Utc;
use surrealdb::RecordId;

use catalog_server::core::Config;
use catalog_server::db::DbService;
use catalog_server::db::filter::{MenuItemFilter, MenuItemSort, RestaurantFilter, RestaurantSort, SortOrder};
use catalog_server::db::models::{Address, DeliveryEta, MenuItem, MenuItemUpdate, Restaurant, RestaurantUpdate};
use catalog_server::db::repository::RepoError;
use catalog_server::services::CatalogService;
use catalog_server::utils::AppError;
use catalog_server::utils::query::PageWindow;

async fn service() -> CatalogService {
    let (catalog, _) = service_with_db().await;
    catalog
}

async fn service_with_db() -> (CatalogService, DbService) {
    let db = DbService::memory().await.unwrap();
    (CatalogService::new(db.db.clone()), db)
}

fn address(city: &str) -> Address {
    Address {
        line1: "12 MG Road".into(),
        line2: Some("2nd floor".into()),
        city: city.into(),
        state: Some("Karnataka".into()),
        country: "India".into(),
        zip: "560001".into(),
        coordinates: None,
    }
}

fn restaurant(name: &str, city: &str) -> Restaurant {
    let now = Utc::now();
    Restaurant {
        id: None,
        name: name.into(),
        slug: String::new(),
        description: None,
        cuisines: vec!["North Indian".into()],
        tags: vec![],
        image_url: None,
        avg_cost_for_two: 400.0,
        rating: 4.2,
        review_count: 10,
        is_open: true,
        is_archived: false,
        delivery_eta_mins: DeliveryEta::default(),
        address: address(city),
        created_at: now,
        updated_at: now,
    }
}

fn menu_item(restaurant: RecordId, name: &str, price: f64, is_veg: bool) -> MenuItem {
    let now = Utc::now();
    MenuItem {
        id: None,
        restaurant,
        name: name.into(),
        description: None,
        price,
        currency: "INR".into(),
        category: Some("Mains".into()),
        tags: vec![],
        image_url: None,
        is_veg,
        is_available: true,
        is_archived: false,
        spice_level: None,
        addons: vec![],
        calories: None,
        created_at: now,
        updated_at: now,
    }
}

fn window(page: u32, limit: u32) -> PageWindow {
    PageWindow::resolve(Some(page), Some(limit), &Config::for_tests())
}

// ========== Slug allocation ==========

#[tokio::test]
async fn slug_is_derived_and_suffixed_on_collision() {
    let catalog = service().await;

    let first = catalog
        .create_restaurant("Tasty Bites!", restaurant("Tasty Bites!", "Pune"))
        .await
        .unwrap();
    assert_eq!(first.slug, "tasty-bites");

    let second = catalog
        .create_restaurant("Tasty Bites!", restaurant("Tasty Bites!", "Mumbai"))
        .await
        .unwrap();
    assert_eq!(second.slug, "tasty-bites-1");

    let third = catalog
        .create_restaurant("Tasty Bites!", restaurant("Tasty Bites!", "Delhi"))
        .await
        .unwrap();
    assert_eq!(third.slug, "tasty-bites-2");
}

#[tokio::test]
async fn rename_to_own_slug_keeps_it_unsuffixed() {
    let catalog = service().await;
    let created = catalog
        .create_restaurant("Spice Route", restaurant("Spice Route", "Pune"))
        .await
        .unwrap();
    assert_eq!(created.slug, "spice-route");

    // Re-submitting the same hint must not append a suffix
    let updated = catalog
        .update_restaurant(
            "spice-route",
            Some("Spice Route"),
            RestaurantUpdate::default(),
        )
        .await
        .unwrap();
    assert_eq!(updated.slug, "spice-route");
}

#[tokio::test]
async fn archived_restaurant_keeps_its_slug_reserved() {
    let (catalog, db) = service_with_db().await;
    let created = catalog
        .create_restaurant("Biryani House", restaurant("Biryani House", "Pune"))
        .await
        .unwrap();
    let id = created.id.clone().unwrap();

    // Archive out-of-band; there is no public archive route for restaurants
    db.db
        .query("UPDATE $thing SET is_archived = true")
        .bind(("thing", id.clone()))
        .await
        .unwrap();

    // Invisible to resolution...
    let err = catalog.resolve_restaurant("biryani-house").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // ...but still holding the slug
    let next = catalog
        .create_restaurant("Biryani House", restaurant("Biryani House", "Delhi"))
        .await
        .unwrap();
    assert_eq!(next.slug, "biryani-house-1");
}

// ========== Resolution ==========

#[tokio::test]
async fn resolves_by_id_and_by_slug() {
    let catalog = service().await;
    let created = catalog
        .create_restaurant("Dosa Corner", restaurant("Dosa Corner", "Chennai"))
        .await
        .unwrap();
    let id = created.id.clone().unwrap();

    let by_slug = catalog.resolve_restaurant("dosa-corner").await.unwrap();
    assert_eq!(by_slug.id, created.id);

    let by_id = catalog.resolve_restaurant(&id.to_string()).await.unwrap();
    assert_eq!(by_id.slug, "dosa-corner");

    // Slug lookup is case-insensitive
    let upper = catalog.resolve_restaurant("DOSA-CORNER").await.unwrap();
    assert_eq!(upper.id, created.id);
}

// ========== Partial updates ==========

#[tokio::test]
async fn empty_update_set_is_rejected_without_a_write() {
    let catalog = service().await;
    let created = catalog
        .create_restaurant("Thali Express", restaurant("Thali Express", "Pune"))
        .await
        .unwrap();
    let id = created.id.clone().unwrap();

    let err = catalog
        .restaurants()
        .update_set(&id, RestaurantUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let unchanged = catalog.resolve_restaurant("thali-express").await.unwrap();
    assert_eq!(unchanged.updated_at, created.updated_at);
}

#[tokio::test]
async fn single_field_update_leaves_the_rest_untouched() {
    let catalog = service().await;
    let created = catalog
        .create_restaurant("Curry Leaf", restaurant("Curry Leaf", "Kochi"))
        .await
        .unwrap();

    let updated = catalog
        .update_restaurant(
            "curry-leaf",
            None,
            RestaurantUpdate {
                is_open: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!updated.is_open);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.slug, created.slug);
    assert_eq!(updated.rating, created.rating);
    assert_eq!(updated.address.city, "Kochi");
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn created_address_round_trips_by_slug() {
    let catalog = service().await;
    catalog
        .create_restaurant("Udupi Grand", restaurant("Udupi Grand", "Bengaluru"))
        .await
        .unwrap();

    let fetched = catalog.resolve_restaurant("udupi-grand").await.unwrap();
    assert_eq!(fetched.address.line1, "12 MG Road");
    assert_eq!(fetched.address.line2.as_deref(), Some("2nd floor"));
    assert_eq!(fetched.address.city, "Bengaluru");
    assert_eq!(fetched.address.state.as_deref(), Some("Karnataka"));
    assert_eq!(fetched.address.country, "India");
    assert_eq!(fetched.address.zip, "560001");
}

// ========== Restaurant listing ==========

#[tokio::test]
async fn list_filters_by_city_case_insensitively() {
    let catalog = service().await;
    catalog
        .create_restaurant("A", restaurant("A", "Pune"))
        .await
        .unwrap();
    catalog
        .create_restaurant("B", restaurant("B", "Mumbai"))
        .await
        .unwrap();

    let filter = RestaurantFilter {
        city: Some("PUNE".into()),
        ..Default::default()
    };
    let (rows, total) = catalog
        .restaurants()
        .find(&filter, RestaurantSort::Name, &window(1, 10))
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "A");
}

#[tokio::test]
async fn list_pages_are_disjoint_slices_of_the_sorted_result() {
    let catalog = service().await;
    for name in ["Alpha", "Bravo", "Charlie", "Delta", "Echo"] {
        catalog
            .create_restaurant(name, restaurant(name, "Pune"))
            .await
            .unwrap();
    }

    let filter = RestaurantFilter::default();
    let (page1, total) = catalog
        .restaurants()
        .find(&filter, RestaurantSort::Name, &window(1, 2))
        .await
        .unwrap();
    let (page2, _) = catalog
        .restaurants()
        .find(&filter, RestaurantSort::Name, &window(2, 2))
        .await
        .unwrap();
    let (page3, _) = catalog
        .restaurants()
        .find(&filter, RestaurantSort::Name, &window(3, 2))
        .await
        .unwrap();

    assert_eq!(total, 5);
    let names: Vec<&str> = page1
        .iter()
        .chain(&page2)
        .chain(&page3)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alpha", "Bravo", "Charlie", "Delta", "Echo"]);
}

// ========== Menu items ==========

#[tokio::test]
async fn veg_price_filter_sorted_desc_page_two() {
    let catalog = service().await;
    let created = catalog
        .create_restaurant("Pav Bhaji Point", restaurant("Pav Bhaji Point", "Pune"))
        .await
        .unwrap();
    let rid = created.id.clone().unwrap();

    for (name, price) in [
        ("Item 50", 50.0),
        ("Item 120", 120.0),
        ("Item 150", 150.0),
        ("Item 200", 200.0),
        ("Item 300", 300.0),
    ] {
        catalog
            .create_menu_item(menu_item(rid.clone(), name, price, true))
            .await
            .unwrap();
    }

    let filter = MenuItemFilter {
        restaurant_key: Some(rid.key().to_string()),
        is_veg: Some(true),
        min_price: Some(100.0),
        ..Default::default()
    };
    let (rows, total) = catalog
        .menu_items()
        .find(&filter, MenuItemSort::Price, SortOrder::Desc, &window(2, 2))
        .await
        .unwrap();

    // Matching prices sorted desc: [300, 200, 150, 120]; page 2 of size 2
    assert_eq!(total, 4);
    let prices: Vec<f64> = rows.iter().map(|i| i.price).collect();
    assert_eq!(prices, vec![150.0, 120.0]);
}

#[tokio::test]
async fn archived_items_disappear_from_every_read_path() {
    let catalog = service().await;
    let created = catalog
        .create_restaurant("Chaat Street", restaurant("Chaat Street", "Pune"))
        .await
        .unwrap();
    let rid = created.id.clone().unwrap();

    let item = catalog
        .create_menu_item(menu_item(rid.clone(), "Samosa", 40.0, true))
        .await
        .unwrap();
    let item_id = item.id.clone().unwrap();

    assert!(catalog.menu_items().archive(&item_id, &rid).await.unwrap());

    assert!(
        catalog
            .menu_items()
            .find_by_id(&item_id)
            .await
            .unwrap()
            .is_none()
    );
    let filter = MenuItemFilter {
        restaurant_key: Some(rid.key().to_string()),
        ..Default::default()
    };
    let (rows, total) = catalog
        .menu_items()
        .find(&filter, MenuItemSort::Name, SortOrder::Asc, &window(1, 10))
        .await
        .unwrap();
    assert_eq!(total, 0);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn second_archive_reports_not_found() {
    let catalog = service().await;
    let created = catalog
        .create_restaurant("Momo Hut", restaurant("Momo Hut", "Pune"))
        .await
        .unwrap();
    let rid = created.id.clone().unwrap();

    let item = catalog
        .create_menu_item(menu_item(rid.clone(), "Steam Momo", 90.0, true))
        .await
        .unwrap();
    let item_id = item.id.clone().unwrap();

    assert!(catalog.menu_items().archive(&item_id, &rid).await.unwrap());
    assert!(!catalog.menu_items().archive(&item_id, &rid).await.unwrap());
}

#[tokio::test]
async fn item_updates_are_scoped_to_the_owning_restaurant() {
    let catalog = service().await;
    let owner = catalog
        .create_restaurant("Owner", restaurant("Owner", "Pune"))
        .await
        .unwrap();
    let other = catalog
        .create_restaurant("Other", restaurant("Other", "Pune"))
        .await
        .unwrap();
    let owner_id = owner.id.clone().unwrap();
    let other_id = other.id.clone().unwrap();

    let item = catalog
        .create_menu_item(menu_item(owner_id.clone(), "Kebab", 250.0, false))
        .await
        .unwrap();
    let item_id = item.id.clone().unwrap();

    let update = MenuItemUpdate {
        price: Some(275.0),
        ..Default::default()
    };
    let err = catalog
        .menu_items()
        .update_set(&item_id, &other_id, update.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    let updated = catalog
        .menu_items()
        .update_set(&item_id, &owner_id, update)
        .await
        .unwrap();
    assert_eq!(updated.price, 275.0);
    assert_eq!(updated.name, "Kebab");
}
