//! Delivery statistics: top products, top beneficiaries, per-month
//! delivery counts.

use chrono::{Datelike, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::db::DbPool;
use crate::entities::beneficiary::Entity as Beneficiary;
use crate::entities::outbound_order::{self, Entity as OutboundOrder};
use crate::entities::outbound_order_item::Entity as OutboundOrderItem;
use crate::entities::product::Entity as Product;
use crate::errors::ServiceError;

const TOP_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct TopProduct {
    pub product_id: i64,
    pub product_name: String,
    pub units_delivered: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopBeneficiary {
    pub dni: String,
    pub name: String,
    pub order_count: u64,
    pub units_received: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyDeliveries {
    pub month: u32,
    pub month_name: &'static str,
    pub order_count: u64,
    pub units_delivered: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryStatistics {
    pub top_products: Vec<TopProduct>,
    pub top_beneficiaries: Vec<TopBeneficiary>,
    /// Deliveries of the current year, one entry per month 1..=12.
    pub deliveries_by_month: Vec<MonthlyDeliveries>,
    pub total_beneficiaries: u64,
    pub total_units_delivered: i64,
    /// Month (1-12) with the most dispatched orders this year, when any.
    pub busiest_month: Option<u32>,
    pub busiest_month_name: Option<&'static str>,
}

/// Spanish month name, January = 1.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Enero",
        2 => "Febrero",
        3 => "Marzo",
        4 => "Abril",
        5 => "Mayo",
        6 => "Junio",
        7 => "Julio",
        8 => "Agosto",
        9 => "Septiembre",
        10 => "Octubre",
        11 => "Noviembre",
        12 => "Diciembre",
        _ => "",
    }
}

#[derive(Clone)]
pub struct StatisticsService {
    db_pool: Arc<DbPool>,
}

impl StatisticsService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn build(&self) -> Result<DeliveryStatistics, ServiceError> {
        let db = self.db_pool.as_ref();

        let orders = OutboundOrder::find().all(db).await?;
        let items = OutboundOrderItem::find().all(db).await?;
        let products = Product::find().all(db).await?;
        let product_names: HashMap<i64, String> =
            products.into_iter().map(|p| (p.id, p.name)).collect();
        let orders_by_id: HashMap<i64, &outbound_order::Model> =
            orders.iter().map(|o| (o.id, o)).collect();

        // Top products by total dispatched units.
        let mut units_per_product: HashMap<i64, i64> = HashMap::new();
        for item in &items {
            *units_per_product.entry(item.product_id).or_insert(0) += i64::from(item.quantity);
        }
        let mut top_products: Vec<TopProduct> = units_per_product
            .into_iter()
            .map(|(product_id, units_delivered)| TopProduct {
                product_id,
                product_name: product_names
                    .get(&product_id)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", product_id)),
                units_delivered,
            })
            .collect();
        top_products.sort_by(|a, b| {
            b.units_delivered
                .cmp(&a.units_delivered)
                .then_with(|| a.product_name.cmp(&b.product_name))
        });
        top_products.truncate(TOP_LIMIT);

        // Top beneficiaries by units received; beneficiaries with no
        // delivered units are dropped from the ranking.
        let mut units_per_order: HashMap<i64, i64> = HashMap::new();
        for item in &items {
            *units_per_order.entry(item.order_id).or_insert(0) += i64::from(item.quantity);
        }
        let mut per_beneficiary: HashMap<String, TopBeneficiary> = HashMap::new();
        for order in &orders {
            let units = units_per_order.get(&order.id).copied().unwrap_or(0);
            let entry = per_beneficiary
                .entry(order.beneficiary_dni.clone())
                .or_insert_with(|| TopBeneficiary {
                    dni: order.beneficiary_dni.clone(),
                    name: order.beneficiary_name.clone(),
                    order_count: 0,
                    units_received: 0,
                });
            entry.order_count += 1;
            entry.units_received += units;
        }
        let mut top_beneficiaries: Vec<TopBeneficiary> = per_beneficiary
            .into_values()
            .filter(|b| b.units_received > 0)
            .collect();
        top_beneficiaries.sort_by(|a, b| {
            b.units_received
                .cmp(&a.units_received)
                .then_with(|| b.order_count.cmp(&a.order_count))
                .then_with(|| a.dni.cmp(&b.dni))
        });
        top_beneficiaries.truncate(TOP_LIMIT);

        // Everyone in the register counts, served or not.
        let total_beneficiaries = Beneficiary::find().count(db).await?;

        // Current-year deliveries broken down per calendar month.
        let current_year = Utc::now().year();
        let mut deliveries_by_month: Vec<MonthlyDeliveries> = (1..=12)
            .map(|month| MonthlyDeliveries {
                month,
                month_name: month_name(month),
                order_count: 0,
                units_delivered: 0,
            })
            .collect();
        for order in &orders {
            if order.dispatch_date.year() != current_year {
                continue;
            }
            let slot = &mut deliveries_by_month[order.dispatch_date.month0() as usize];
            slot.order_count += 1;
            slot.units_delivered += units_per_order.get(&order.id).copied().unwrap_or(0);
        }

        let busiest_month = deliveries_by_month
            .iter()
            .filter(|m| m.order_count > 0)
            .max_by_key(|m| m.order_count)
            .map(|m| m.month);

        let total_units_delivered = items
            .iter()
            .filter(|i| orders_by_id.contains_key(&i.order_id))
            .map(|i| i64::from(i.quantity))
            .sum();

        Ok(DeliveryStatistics {
            top_products,
            top_beneficiaries,
            deliveries_by_month,
            total_beneficiaries,
            total_units_delivered,
            busiest_month,
            busiest_month_name: busiest_month.map(month_name),
        })
    }

    /// Orders dispatched to one beneficiary, by DNI.
    #[instrument(skip(self))]
    pub async fn orders_for_beneficiary(
        &self,
        dni: &str,
    ) -> Result<Vec<outbound_order::Model>, ServiceError> {
        let orders = OutboundOrder::find()
            .filter(outbound_order::Column::BeneficiaryDni.eq(dni))
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }
}
