mod common;

use assert_matches::assert_matches;
use chrono::Utc;
use rust_decimal_macros::dec;

use almacen_api::entities::{OrderKind, OrderStatus};
use almacen_api::errors::ServiceError;
use almacen_api::services::{OrderLineInput, ProductService, SupplyOrderInput, SupplyOrderService};

fn line(product_id: Option<i64>, quantity: i32, unit_price: rust_decimal::Decimal) -> OrderLineInput {
    OrderLineInput {
        product_id,
        quantity,
        unit_price,
    }
}

fn input(supplier_id: i64, user_id: i64, items: Vec<OrderLineInput>) -> SupplyOrderInput {
    SupplyOrderInput {
        id: None,
        document_number: None,
        order_date: Utc::now().date_naive(),
        kind: OrderKind::Solidas,
        supplier_id,
        user_id,
        status: None,
        notes: None,
        items,
    }
}

#[tokio::test]
async fn creating_an_order_deposits_stock_and_totals_lines() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 10, 2).await;
    let sugar = common::seed_product(&pool, "P-002", "Azúcar", 0, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Proveedor SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = SupplyOrderService::new(pool.clone(), events.clone());
    let order = service
        .save(input(
            supplier.id,
            user.id,
            vec![
                line(Some(rice.id), 5, dec!(3.00)),
                line(Some(sugar.id), 8, dec!(2.50)),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(order.total, dec!(35.00));
    assert_eq!(order.status, OrderStatus::Pending);

    let products = ProductService::new(pool.clone(), events);
    assert_eq!(products.get(rice.id).await.unwrap().quantity, 15);
    assert_eq!(products.get(sugar.id).await.unwrap().quantity, 8);

    let (_, items) = service.get_with_items(order.id).await.unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn product_less_lines_are_dropped_not_rejected() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 0, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Proveedor SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = SupplyOrderService::new(pool, events);
    let order = service
        .save(input(
            supplier.id,
            user.id,
            vec![line(None, 99, dec!(100)), line(Some(rice.id), 4, dec!(1.00))],
        ))
        .await
        .unwrap();

    assert_eq!(order.total, dec!(4.00));
    let (_, items) = service.get_with_items(order.id).await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn all_invalid_lines_reject_the_order() {
    let (pool, events) = common::setup().await;
    common::seed_product(&pool, "P-001", "Arroz", 0, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Proveedor SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = SupplyOrderService::new(pool, events);
    let result = service
        .save(input(
            supplier.id,
            user.id,
            vec![line(None, 5, dec!(1.00)), line(None, 2, dec!(2.00))],
        ))
        .await;

    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn unknown_supplier_is_rejected() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 0, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = SupplyOrderService::new(pool, events);
    let result = service
        .save(input(9999, user.id, vec![line(Some(rice.id), 1, dec!(1))]))
        .await;

    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn editing_applies_the_stock_delta() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 10, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Proveedor SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = SupplyOrderService::new(pool.clone(), events.clone());
    let order = service
        .save(input(
            supplier.id,
            user.id,
            vec![line(Some(rice.id), 5, dec!(2.00))],
        ))
        .await
        .unwrap();

    let products = ProductService::new(pool.clone(), events.clone());
    assert_eq!(products.get(rice.id).await.unwrap().quantity, 15);

    // Edit down from 5 to 2: stock moves by -3.
    let mut edit = input(supplier.id, user.id, vec![line(Some(rice.id), 2, dec!(2.00))]);
    edit.id = Some(order.id);
    let edited = service.save(edit).await.unwrap();

    assert_eq!(edited.id, order.id);
    assert_eq!(edited.document_number, order.document_number);
    assert_eq!(edited.total, dec!(4.00));
    assert_eq!(products.get(rice.id).await.unwrap().quantity, 12);

    let (_, items) = service.get_with_items(order.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
}

#[tokio::test]
async fn deleting_an_order_does_not_compensate_stock() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 0, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Proveedor SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = SupplyOrderService::new(pool.clone(), events.clone());
    let order = service
        .save(input(
            supplier.id,
            user.id,
            vec![line(Some(rice.id), 7, dec!(1.00))],
        ))
        .await
        .unwrap();

    service.delete(order.id).await.unwrap();

    assert_matches!(
        service.get_with_items(order.id).await,
        Err(ServiceError::NotFound(_))
    );
    // Stock received at creation stays in the warehouse.
    let products = ProductService::new(pool.clone(), events);
    assert_eq!(products.get(rice.id).await.unwrap().quantity, 7);
}

#[tokio::test]
async fn positive_line_prices_refresh_the_product_price() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 0, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Proveedor SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = SupplyOrderService::new(pool.clone(), events.clone());
    service
        .save(input(
            supplier.id,
            user.id,
            vec![line(Some(rice.id), 1, dec!(9.90))],
        ))
        .await
        .unwrap();

    let products = ProductService::new(pool.clone(), events);
    assert_eq!(products.get(rice.id).await.unwrap().unit_price, dec!(9.90));
}

#[tokio::test]
async fn filters_by_kind_and_status() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 0, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Proveedor SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = SupplyOrderService::new(pool, events);

    let mut donation = input(supplier.id, user.id, vec![line(Some(rice.id), 1, dec!(1))]);
    donation.kind = OrderKind::Donaciones;
    donation.status = Some(OrderStatus::Approved);
    service.save(donation).await.unwrap();

    service
        .save(input(supplier.id, user.id, vec![line(Some(rice.id), 1, dec!(1))]))
        .await
        .unwrap();

    assert_eq!(service.list().await.unwrap().len(), 2);
    assert_eq!(
        service.list_by_kind(OrderKind::Donaciones).await.unwrap().len(),
        1
    );
    assert_eq!(service.list_pending().await.unwrap().len(), 1);
    assert_eq!(service.list_current_month().await.unwrap().len(), 2);
}
