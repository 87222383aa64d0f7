//! Catalog filtering and shopping-list accumulation through `AppState`.

use std::io::Write;

use shop_track::config::AppConfig;
use shop_track::services::catalog::{Catalog, CatalogService, filter_products};
use shop_track::state::AppState;
use shop_track_core::{Category, Product, ShoppingListEntry};
use shop_track_integration_tests::in_memory_state;

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_bakery_dairy_example() {
    let catalog = vec![
        Product::new("Bread", "", "Bakery"),
        Product::new("Cheese", "", "Dairy"),
    ];

    assert_eq!(names(&filter_products(&catalog, Some("Dairy"), "")), ["Cheese"]);
    assert_eq!(names(&filter_products(&catalog, None, "brea")), ["Bread"]);
    assert_eq!(filter_products(&catalog, None, ""), catalog);
}

#[test]
fn test_service_over_custom_catalog() {
    let catalog = Catalog::new(
        vec![Category::new("basket", "Bakery"), Category::new("drop", "Dairy")],
        vec![
            Product::new("Bread", "", "Bakery"),
            Product::new("Cheese", "", "Dairy"),
            Product::new("Brie", "", "Dairy"),
        ],
    )
    .unwrap();
    let service = CatalogService::new(catalog);

    service.select_category("Dairy");
    service.set_search_text("BR");
    assert_eq!(names(&service.visible_products()), ["Brie"]);
}

#[tokio::test]
async fn test_builtin_catalog_through_state() {
    let state = in_memory_state().await;
    let catalog = state.catalog();

    catalog.select_category("Food");
    assert_eq!(
        names(&catalog.visible_products()),
        ["Whole Wheat Bread", "Cheese"]
    );

    catalog.set_search_text("juice");
    assert!(catalog.visible_products().is_empty());

    catalog.clear_category();
    assert_eq!(names(&catalog.visible_products()), ["Apple Juice"]);
}

#[tokio::test]
async fn test_yaml_catalog_from_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "categories:\n  - {{ icon: basket, name: Bakery }}\nproducts:\n  - {{ name: Bagel, category: Bakery }}\n"
    )
    .unwrap();

    let config = AppConfig {
        catalog_path: Some(file.path().to_path_buf()),
        ..AppConfig::in_memory()
    };
    let state = AppState::connect(config).await.unwrap();

    assert_eq!(names(&state.catalog().visible_products()), ["Bagel"]);
}

// =============================================================================
// Shopping list
// =============================================================================

#[tokio::test]
async fn test_add_to_list_keeps_every_call() {
    let state = in_memory_state().await;
    let list = state.shopping_list();

    for _ in 0..3 {
        list.add_to_list("Cheese");
    }
    list.add_to_list("Bread");

    let entries: Vec<String> = list.entries().into_iter().map(|e| e.name).collect();
    assert_eq!(entries, ["Cheese", "Cheese", "Cheese", "Bread"]);
}

#[tokio::test]
async fn test_list_sections_from_catalog_products() {
    let state = in_memory_state().await;
    let catalog = state.catalog().catalog();

    for name in ["Cheese", "Apple Juice", "Whole Wheat Bread"] {
        let product = catalog.product_by_name(name).unwrap();
        state.shopping_list().add_product(product);
    }
    state.shopping_list().add_to_list("Batteries");

    let sections = state.shopping_list().sections();
    let labels: Vec<&str> = sections.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Food", "Beverages", ShoppingListEntry::UNCATEGORIZED]);
}

#[tokio::test]
async fn test_logout_keeps_list() {
    let state = in_memory_state().await;
    state.auth().login("a@b.com", "p").await.unwrap();
    let id = state.shopping_list().add_to_list("Cheese");
    state.shopping_list().toggle_checked(id).unwrap();

    state.auth().logout();

    let entries = state.shopping_list().entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_checked);
}
