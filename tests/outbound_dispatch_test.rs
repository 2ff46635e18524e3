mod common;

use assert_matches::assert_matches;
use chrono::{Datelike, Utc};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use almacen_api::entities::beneficiary::Entity as Beneficiary;
use almacen_api::entities::inventory_movement::{self, Entity as InventoryMovement, MovementKind};
use almacen_api::errors::ServiceError;
use almacen_api::services::{DispatchInput, OrderLineInput, OutboundOrderService, ProductService};

fn line(product_id: i64, quantity: i32) -> OrderLineInput {
    OrderLineInput {
        product_id: Some(product_id),
        quantity,
        unit_price: dec!(0),
    }
}

fn dispatch_input(user_id: i64, items: Vec<OrderLineInput>) -> DispatchInput {
    DispatchInput {
        dispatch_date: Utc::now().date_naive(),
        beneficiary_dni: "45678901".to_string(),
        beneficiary_name: "María Quispe Huamán".to_string(),
        user_id,
        description: None,
        items,
    }
}

#[tokio::test]
async fn dispatch_withdraws_stock_and_journals_movements() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 20, 2).await;
    let sugar = common::seed_product(&pool, "P-002", "Azúcar", 10, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = OutboundOrderService::new(pool.clone(), events.clone());
    let order = service
        .dispatch(dispatch_input(
            user.id,
            vec![line(rice.id, 5), line(sugar.id, 3)],
        ))
        .await
        .unwrap();

    assert_eq!(order.delivered_count, 8);

    let products = ProductService::new(pool.clone(), events);
    assert_eq!(products.get(rice.id).await.unwrap().quantity, 15);
    assert_eq!(products.get(sugar.id).await.unwrap().quantity, 7);

    let movements = InventoryMovement::find()
        .filter(inventory_movement::Column::OutboundOrderId.eq(order.id))
        .all(pool.as_ref())
        .await
        .unwrap();
    assert_eq!(movements.len(), 2);
    assert!(movements.iter().all(|m| m.kind == MovementKind::Outbound));
    assert!(movements
        .iter()
        .all(|m| m.reason.contains(&order.order_number)));
}

#[tokio::test]
async fn numbers_follow_the_documented_shapes() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 20, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = OutboundOrderService::new(pool, events);
    let date = Utc::now().date_naive();

    let first = service
        .dispatch(dispatch_input(user.id, vec![line(rice.id, 1)]))
        .await
        .unwrap();
    let second = service
        .dispatch(dispatch_input(user.id, vec![line(rice.id, 1)]))
        .await
        .unwrap();

    assert_eq!(first.order_number, format!("OS-0001-{}", date.year()));
    assert_eq!(second.order_number, format!("OS-0002-{}", date.year()));
    assert_eq!(
        first.dispatch_number,
        format!("OS-{}-0001", date.format("%Y-%m"))
    );
    assert_eq!(
        second.dispatch_number,
        format!("OS-{}-0002", date.format("%Y-%m"))
    );
    assert!(first.tramite_number.starts_with("TRAM-"));
}

#[tokio::test]
async fn unknown_beneficiaries_are_registered_by_dni() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 20, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = OutboundOrderService::new(pool.clone(), events);
    let order = service
        .dispatch(dispatch_input(user.id, vec![line(rice.id, 1)]))
        .await
        .unwrap();

    let beneficiary = Beneficiary::find_by_id(order.beneficiary_id.unwrap())
        .one(pool.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(beneficiary.dni, "45678901");
    // Name splits on the first space.
    assert_eq!(beneficiary.first_names, "María");
    assert_eq!(beneficiary.last_names.as_deref(), Some("Quispe Huamán"));

    // A second dispatch for the same DNI reuses the registry entry.
    let again = service
        .dispatch(dispatch_input(user.id, vec![line(rice.id, 1)]))
        .await
        .unwrap();
    assert_eq!(again.beneficiary_id, order.beneficiary_id);
    assert_eq!(
        Beneficiary::find().all(pool.as_ref()).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn insufficient_stock_rolls_back_the_whole_order() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 20, 2).await;
    let sugar = common::seed_product(&pool, "P-002", "Azúcar", 2, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = OutboundOrderService::new(pool.clone(), events.clone());
    let result = service
        .dispatch(dispatch_input(
            user.id,
            vec![line(rice.id, 5), line(sugar.id, 3)],
        ))
        .await;

    assert_matches!(result, Err(ServiceError::InsufficientStock(_)));

    // The first line's withdrawal was rolled back with everything else.
    let products = ProductService::new(pool.clone(), events);
    assert_eq!(products.get(rice.id).await.unwrap().quantity, 20);
    assert_eq!(products.get(sugar.id).await.unwrap().quantity, 2);
    assert!(service.list().await.unwrap().is_empty());
    assert!(InventoryMovement::find()
        .all(pool.as_ref())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn missing_price_falls_back_to_the_product_price() {
    let (pool, events) = common::setup().await;
    // Seeded products carry a 2.50 unit price.
    let rice = common::seed_product(&pool, "P-001", "Arroz", 20, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = OutboundOrderService::new(pool, events);
    let order = service
        .dispatch(dispatch_input(user.id, vec![line(rice.id, 4)]))
        .await
        .unwrap();

    let (_, items) = service.get_with_items(order.id).await.unwrap();
    assert_eq!(items[0].unit_price, dec!(2.50));
    assert_eq!(items[0].subtotal, dec!(10.00));
}

#[tokio::test]
async fn deleting_a_dispatch_restores_stock_and_journal() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 20, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = OutboundOrderService::new(pool.clone(), events.clone());
    let order = service
        .dispatch(dispatch_input(user.id, vec![line(rice.id, 6)]))
        .await
        .unwrap();

    let products = ProductService::new(pool.clone(), events);
    assert_eq!(products.get(rice.id).await.unwrap().quantity, 14);

    service.delete(order.id).await.unwrap();

    assert_eq!(products.get(rice.id).await.unwrap().quantity, 20);
    assert!(InventoryMovement::find()
        .all(pool.as_ref())
        .await
        .unwrap()
        .is_empty());
    assert_matches!(
        service.get_with_items(order.id).await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn searches_by_dni_tramite_and_date() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 20, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let service = OutboundOrderService::new(pool, events);
    let date = Utc::now().date_naive();
    let order = service
        .dispatch(dispatch_input(user.id, vec![line(rice.id, 1)]))
        .await
        .unwrap();

    assert_eq!(service.search_by_dni("4567").await.unwrap().len(), 1);
    assert!(service.search_by_dni("0000").await.unwrap().is_empty());
    assert_eq!(service.search_by_tramite("TRAM-").await.unwrap().len(), 1);
    assert_eq!(
        service.list_by_date_range(date, date).await.unwrap().len(),
        1
    );
    assert_eq!(
        service
            .get_by_number(&order.order_number)
            .await
            .unwrap()
            .unwrap()
            .id,
        order.id
    );
    assert_eq!(service.count().await.unwrap(), 1);
}
