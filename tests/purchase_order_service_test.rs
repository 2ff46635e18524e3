mod common;

use assert_matches::assert_matches;
use chrono::Utc;
use rust_decimal_macros::dec;

use almacen_api::entities::{OrderKind, OrderStatus};
use almacen_api::errors::ServiceError;
use almacen_api::services::{
    OrderLineInput, ProductService, PurchaseOrderInput, PurchaseOrderService,
};

fn input(supplier_id: i64, user_id: i64, items: Vec<OrderLineInput>) -> PurchaseOrderInput {
    PurchaseOrderInput {
        id: None,
        document_number: None,
        order_date: Utc::now().date_naive(),
        kind: OrderKind::UtilesOficina,
        supplier_id,
        user_id,
        status: None,
        notes: None,
        items,
    }
}

fn line(product_id: i64, quantity: i32) -> OrderLineInput {
    OrderLineInput {
        product_id: Some(product_id),
        quantity,
        unit_price: dec!(4.00),
    }
}

#[tokio::test]
async fn purchase_orders_never_touch_stock() {
    let (pool, events) = common::setup().await;
    let paper = common::seed_product(&pool, "P-100", "Papel bond", 10, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Librería SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = PurchaseOrderService::new(pool.clone(), events.clone());
    let order = service
        .save(input(supplier.id, user.id, vec![line(paper.id, 50)]))
        .await
        .unwrap();

    assert_eq!(order.total, dec!(200.00));
    assert_eq!(order.status, OrderStatus::Pending);

    let products = ProductService::new(pool.clone(), events);
    assert_eq!(products.get(paper.id).await.unwrap().quantity, 10);
}

#[tokio::test]
async fn editing_replaces_the_item_set() {
    let (pool, events) = common::setup().await;
    let paper = common::seed_product(&pool, "P-100", "Papel bond", 10, 2).await;
    let pens = common::seed_product(&pool, "P-101", "Lapiceros", 10, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Librería SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = PurchaseOrderService::new(pool, events);
    let order = service
        .save(input(supplier.id, user.id, vec![line(paper.id, 50)]))
        .await
        .unwrap();

    let mut edit = input(supplier.id, user.id, vec![line(pens.id, 12)]);
    edit.id = Some(order.id);
    edit.status = Some(OrderStatus::Approved);
    let edited = service.save(edit).await.unwrap();

    assert_eq!(edited.id, order.id);
    assert_eq!(edited.document_number, order.document_number);
    assert_eq!(edited.status, OrderStatus::Approved);
    assert_eq!(edited.total, dec!(48.00));

    let (_, items) = service.get_with_items(order.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, pens.id);
}

#[tokio::test]
async fn delete_removes_order_and_items() {
    let (pool, events) = common::setup().await;
    let paper = common::seed_product(&pool, "P-100", "Papel bond", 10, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Librería SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = PurchaseOrderService::new(pool, events);
    let order = service
        .save(input(supplier.id, user.id, vec![line(paper.id, 50)]))
        .await
        .unwrap();

    service.delete(order.id).await.unwrap();
    assert_matches!(
        service.get_with_items(order.id).await,
        Err(ServiceError::NotFound(_))
    );
    assert_matches!(service.delete(order.id).await, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn list_filters_by_kind_and_status() {
    let (pool, events) = common::setup().await;
    let paper = common::seed_product(&pool, "P-100", "Papel bond", 10, 2).await;
    let supplier = common::seed_supplier(&pool, "20100000001", "Librería SA").await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = PurchaseOrderService::new(pool, events);
    service
        .save(input(supplier.id, user.id, vec![line(paper.id, 1)]))
        .await
        .unwrap();

    let mut other = input(supplier.id, user.id, vec![line(paper.id, 1)]);
    other.kind = OrderKind::Donaciones;
    other.status = Some(OrderStatus::Completed);
    service.save(other).await.unwrap();

    assert_eq!(service.list().await.unwrap().len(), 2);
    assert_eq!(
        service
            .list_by_kind(OrderKind::UtilesOficina)
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        service
            .list_by_status(OrderStatus::Completed)
            .await
            .unwrap()
            .len(),
        1
    );
}
