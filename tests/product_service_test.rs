mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;

use almacen_api::errors::ServiceError;
use almacen_api::services::{ProductInput, ProductService};

fn input(code: &str, name: &str) -> ProductInput {
    ProductInput {
        code: code.to_string(),
        name: name.to_string(),
        description: None,
        quantity: 0,
        unit: Some("unidad".to_string()),
        min_stock: 2,
        category: Some("Abarrotes".to_string()),
        unit_price: dec!(1.50),
        expires_at: None,
    }
}

#[tokio::test]
async fn create_and_fetch_by_code() {
    let (pool, events) = common::setup().await;
    let service = ProductService::new(pool, events);

    let product = service.create(input("P-001", "Arroz")).await.unwrap();
    assert_eq!(product.code, "P-001");
    assert_eq!(product.quantity, 0);

    let fetched = service.get_by_code("P-001").await.unwrap().unwrap();
    assert_eq!(fetched.id, product.id);
    assert!(service.get_by_code("P-404").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_codes_are_rejected() {
    let (pool, events) = common::setup().await;
    let service = ProductService::new(pool, events);

    service.create(input("P-001", "Arroz")).await.unwrap();
    assert_matches!(
        service.create(input("P-001", "Azúcar")).await,
        Err(ServiceError::Conflict(_))
    );

    // Renaming onto a taken code is also rejected.
    let other = service.create(input("P-002", "Azúcar")).await.unwrap();
    assert_matches!(
        service.update(other.id, input("P-001", "Azúcar")).await,
        Err(ServiceError::Conflict(_))
    );
}

#[tokio::test]
async fn update_does_not_touch_stock() {
    let (pool, events) = common::setup().await;
    let seeded = common::seed_product(&pool, "P-001", "Arroz", 12, 2).await;

    let service = ProductService::new(pool, events);
    let mut edit = input("P-001", "Arroz Extra");
    edit.quantity = 0;
    let updated = service.update(seeded.id, edit).await.unwrap();

    assert_eq!(updated.name, "Arroz Extra");
    assert_eq!(updated.quantity, 12);
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let (pool, events) = common::setup().await;
    let service = ProductService::new(pool, events);

    let mut bad = input("P-001", "Arroz");
    bad.unit_price = dec!(-1);
    assert_matches!(
        service.create(bad).await,
        Err(ServiceError::ValidationError(_))
    );
}

#[tokio::test]
async fn low_stock_uses_the_threshold_inclusively() {
    let (pool, events) = common::setup().await;
    common::seed_product(&pool, "P-001", "Arroz", 2, 2).await;
    common::seed_product(&pool, "P-002", "Azúcar", 3, 2).await;
    common::seed_product(&pool, "P-003", "Aceite", 0, 2).await;

    let service = ProductService::new(pool, events);
    let low = service.low_stock().await.unwrap();
    let codes: Vec<&str> = low.iter().map(|p| p.code.as_str()).collect();

    assert_eq!(codes, vec!["P-003", "P-001"]);
    assert_eq!(service.low_stock_count().await.unwrap(), 2);
}

#[tokio::test]
async fn search_matches_code_and_name_case_insensitively() {
    let (pool, events) = common::setup().await;
    common::seed_product(&pool, "P-001", "Arroz", 1, 2).await;
    common::seed_product(&pool, "X-200", "Leche", 1, 2).await;

    let service = ProductService::new(pool, events);
    assert_eq!(service.search("arroz").await.unwrap().len(), 1);
    assert_eq!(service.search("x-2").await.unwrap().len(), 1);
    assert!(service.search("pan").await.unwrap().is_empty());
}

#[tokio::test]
async fn statistics_aggregate_the_catalogue() {
    let (pool, events) = common::setup().await;
    // Seeded products carry price 2.50 and category "Abarrotes".
    common::seed_product(&pool, "P-001", "Arroz", 4, 2).await;
    common::seed_product(&pool, "P-002", "Azúcar", 2, 2).await;

    let service = ProductService::new(pool, events);
    let stats = service.statistics().await.unwrap();

    assert_eq!(stats.product_count, 2);
    assert_eq!(stats.total_units, 6);
    assert_eq!(stats.low_stock_count, 1);
    assert_eq!(stats.category_count, 1);
    assert_eq!(stats.inventory_value, dec!(15.00));
    assert_eq!(stats.products_per_category.get("Abarrotes"), Some(&2));

    assert_eq!(service.categories().await.unwrap(), vec!["Abarrotes"]);
}

#[tokio::test]
async fn delete_removes_the_product() {
    let (pool, events) = common::setup().await;
    let product = common::seed_product(&pool, "P-001", "Arroz", 1, 2).await;

    let service = ProductService::new(pool, events);
    service.delete(product.id).await.unwrap();

    assert_matches!(service.get(product.id).await, Err(ServiceError::NotFound(_)));
    assert_matches!(service.delete(product.id).await, Err(ServiceError::NotFound(_)));
}
