mod common;

use chrono::{Datelike, Utc};
use rust_decimal_macros::dec;

use almacen_api::services::statistics::month_name;
use almacen_api::services::{
    BeneficiaryInput, BeneficiaryService, DashboardService, DispatchInput, OrderLineInput,
    OutboundOrderService, StatisticsService,
};

fn line(product_id: i64, quantity: i32) -> OrderLineInput {
    OrderLineInput {
        product_id: Some(product_id),
        quantity,
        unit_price: dec!(1.00),
    }
}

fn dispatch(dni: &str, name: &str, user_id: i64, items: Vec<OrderLineInput>) -> DispatchInput {
    DispatchInput {
        dispatch_date: Utc::now().date_naive(),
        beneficiary_dni: dni.to_string(),
        beneficiary_name: name.to_string(),
        user_id,
        description: None,
        items,
    }
}

#[tokio::test]
async fn dashboard_reports_recent_idle_and_low_stock() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 20, 2).await;
    let idle = common::seed_product(&pool, "P-002", "Fideos", 9, 2).await;
    common::seed_product(&pool, "P-003", "Aceite", 1, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let outbound = OutboundOrderService::new(pool.clone(), events);
    let order = outbound
        .dispatch(dispatch("45678901", "María Quispe", user.id, vec![line(rice.id, 5)]))
        .await
        .unwrap();

    let dashboard = DashboardService::new(pool).build().await.unwrap();

    assert_eq!(dashboard.product_count, 3);
    assert_eq!(dashboard.outbound_order_count, 1);

    assert_eq!(dashboard.recent_movements.len(), 1);
    let movement = &dashboard.recent_movements[0];
    assert_eq!(movement.product_name, "Arroz");
    assert_eq!(movement.quantity, 5);
    assert_eq!(movement.beneficiary_dni.as_deref(), Some("45678901"));
    assert_eq!(
        movement.order_number.as_deref(),
        Some(order.order_number.as_str())
    );

    // Undelivered products with stock are idle; the dispatched one is not.
    let idle_ids: Vec<i64> = dashboard.idle_products.iter().map(|p| p.id).collect();
    assert!(idle_ids.contains(&idle.id));
    assert!(!idle_ids.contains(&rice.id));

    let low_codes: Vec<&str> = dashboard.low_stock.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(low_codes, vec!["P-003"]);
}

#[tokio::test]
async fn statistics_rank_products_and_beneficiaries() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 100, 2).await;
    let sugar = common::seed_product(&pool, "P-002", "Azúcar", 100, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let outbound = OutboundOrderService::new(pool.clone(), events);
    outbound
        .dispatch(dispatch(
            "45678901",
            "María Quispe",
            user.id,
            vec![line(rice.id, 10), line(sugar.id, 2)],
        ))
        .await
        .unwrap();
    outbound
        .dispatch(dispatch("45678901", "María Quispe", user.id, vec![line(rice.id, 5)]))
        .await
        .unwrap();
    outbound
        .dispatch(dispatch("87654321", "Juan Pérez", user.id, vec![line(sugar.id, 4)]))
        .await
        .unwrap();

    let stats = StatisticsService::new(pool).build().await.unwrap();

    assert_eq!(stats.top_products.len(), 2);
    assert_eq!(stats.top_products[0].product_name, "Arroz");
    assert_eq!(stats.top_products[0].units_delivered, 15);
    assert_eq!(stats.top_products[1].units_delivered, 6);

    assert_eq!(stats.top_beneficiaries.len(), 2);
    assert_eq!(stats.top_beneficiaries[0].dni, "45678901");
    assert_eq!(stats.top_beneficiaries[0].order_count, 2);
    assert_eq!(stats.top_beneficiaries[0].units_received, 17);

    assert_eq!(stats.total_beneficiaries, 2);
    assert_eq!(stats.total_units_delivered, 21);

    let this_month = Utc::now().month();
    assert_eq!(stats.busiest_month, Some(this_month));
    assert_eq!(stats.busiest_month_name, Some(month_name(this_month)));
    let slot = &stats.deliveries_by_month[(this_month - 1) as usize];
    assert_eq!(slot.order_count, 3);
    assert_eq!(slot.units_delivered, 21);
    assert_eq!(slot.month_name, month_name(this_month));
}

#[tokio::test]
async fn registered_beneficiaries_without_deliveries_still_count() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 100, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let beneficiaries = BeneficiaryService::new(pool.clone(), events.clone());
    beneficiaries
        .create(BeneficiaryInput {
            dni: "11223344".to_string(),
            first_names: "Rosa".to_string(),
            last_names: Some("Flores".to_string()),
            phone: None,
            address: None,
        })
        .await
        .unwrap();

    // Nobody served yet: the register total is still one.
    let stats = StatisticsService::new(pool.clone()).build().await.unwrap();
    assert_eq!(stats.total_beneficiaries, 1);
    assert!(stats.top_beneficiaries.is_empty());

    let outbound = OutboundOrderService::new(pool.clone(), events);
    outbound
        .dispatch(dispatch("45678901", "María Quispe", user.id, vec![line(rice.id, 5)]))
        .await
        .unwrap();

    // Rosa never received anything, but she stays in the total.
    let stats = StatisticsService::new(pool).build().await.unwrap();
    assert_eq!(stats.total_beneficiaries, 2);
    assert_eq!(stats.top_beneficiaries.len(), 1);
    assert_eq!(stats.top_beneficiaries[0].dni, "45678901");
}

#[tokio::test]
async fn beneficiaries_rank_by_units_before_order_count() {
    let (pool, events) = common::setup().await;
    let rice = common::seed_product(&pool, "P-001", "Arroz", 100, 2).await;
    let user = common::seed_user(&pool, "almacenero1").await;

    let outbound = OutboundOrderService::new(pool.clone(), events);
    // One big delivery versus two small ones.
    outbound
        .dispatch(dispatch("45678901", "María Quispe", user.id, vec![line(rice.id, 50)]))
        .await
        .unwrap();
    outbound
        .dispatch(dispatch("87654321", "Juan Pérez", user.id, vec![line(rice.id, 3)]))
        .await
        .unwrap();
    outbound
        .dispatch(dispatch("87654321", "Juan Pérez", user.id, vec![line(rice.id, 2)]))
        .await
        .unwrap();

    let stats = StatisticsService::new(pool).build().await.unwrap();

    assert_eq!(stats.top_beneficiaries[0].dni, "45678901");
    assert_eq!(stats.top_beneficiaries[0].order_count, 1);
    assert_eq!(stats.top_beneficiaries[0].units_received, 50);
    assert_eq!(stats.top_beneficiaries[1].dni, "87654321");
    assert_eq!(stats.top_beneficiaries[1].order_count, 2);
    assert_eq!(stats.top_beneficiaries[1].units_received, 5);
}

#[tokio::test]
async fn empty_warehouse_yields_empty_reports() {
    let (pool, _) = common::setup().await;

    let dashboard = DashboardService::new(pool.clone()).build().await.unwrap();
    assert!(dashboard.recent_movements.is_empty());
    assert!(dashboard.idle_products.is_empty());
    assert_eq!(dashboard.product_count, 0);

    let stats = StatisticsService::new(pool).build().await.unwrap();
    assert!(stats.top_products.is_empty());
    assert!(stats.top_beneficiaries.is_empty());
    assert_eq!(stats.busiest_month, None);
    assert_eq!(stats.total_units_delivered, 0);
    assert_eq!(stats.deliveries_by_month.len(), 12);
}
