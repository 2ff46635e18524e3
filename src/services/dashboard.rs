//! Dashboard aggregation: recent activity, idle products, low stock.

use chrono::{Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::instrument;

use crate::db::DbPool;
use crate::entities::inventory_movement::{self, Entity as InventoryMovement, MovementKind};
use crate::entities::outbound_order::{self, Entity as OutboundOrder};
use crate::entities::product::{self, Entity as Product};
use crate::errors::ServiceError;

const RECENT_WINDOW_DAYS: i64 = 30;
const IDLE_WINDOW_DAYS: i64 = 90;

/// One row of the recent-activity table.
#[derive(Debug, Clone, Serialize)]
pub struct RecentMovement {
    pub product_name: String,
    pub quantity: i32,
    pub moved_at: chrono::DateTime<Utc>,
    pub beneficiary_dni: Option<String>,
    pub order_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    /// Outbound movements of the last 30 days, newest first.
    pub recent_movements: Vec<RecentMovement>,
    /// Products with stock but no outbound movement in the last 90 days.
    pub idle_products: Vec<product::Model>,
    /// Products at or below their minimum stock threshold.
    pub low_stock: Vec<product::Model>,
    pub product_count: u64,
    pub outbound_order_count: u64,
}

#[derive(Clone)]
pub struct DashboardService {
    db_pool: Arc<DbPool>,
}

impl DashboardService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn build(&self) -> Result<DashboardData, ServiceError> {
        let db = self.db_pool.as_ref();
        let now = Utc::now();

        let products = Product::find().all(db).await?;
        let product_names: HashMap<i64, String> =
            products.iter().map(|p| (p.id, p.name.clone())).collect();

        let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
        let recent = InventoryMovement::find()
            .filter(inventory_movement::Column::Kind.eq(MovementKind::Outbound))
            .filter(inventory_movement::Column::MovedAt.gte(recent_cutoff))
            .order_by_desc(inventory_movement::Column::MovedAt)
            .all(db)
            .await?;

        let order_ids: HashSet<i64> = recent
            .iter()
            .filter_map(|m| m.outbound_order_id)
            .collect();
        let orders: HashMap<i64, outbound_order::Model> = if order_ids.is_empty() {
            HashMap::new()
        } else {
            OutboundOrder::find()
                .filter(
                    outbound_order::Column::Id.is_in(order_ids.iter().copied().collect::<Vec<_>>()),
                )
                .all(db)
                .await?
                .into_iter()
                .map(|o| (o.id, o))
                .collect()
        };

        let recent_movements = recent
            .iter()
            .map(|m| {
                let order = m.outbound_order_id.and_then(|id| orders.get(&id));
                RecentMovement {
                    product_name: product_names
                        .get(&m.product_id)
                        .cloned()
                        .unwrap_or_else(|| format!("#{}", m.product_id)),
                    quantity: m.quantity,
                    moved_at: m.moved_at,
                    beneficiary_dni: order.map(|o| o.beneficiary_dni.clone()),
                    order_number: order.map(|o| o.order_number.clone()),
                }
            })
            .collect();

        let idle_cutoff = now - Duration::days(IDLE_WINDOW_DAYS);
        let active_ids: HashSet<i64> = InventoryMovement::find()
            .filter(inventory_movement::Column::Kind.eq(MovementKind::Outbound))
            .filter(inventory_movement::Column::MovedAt.gte(idle_cutoff))
            .all(db)
            .await?
            .into_iter()
            .map(|m| m.product_id)
            .collect();
        let idle_products = products
            .iter()
            .filter(|p| p.quantity > 0 && !active_ids.contains(&p.id))
            .cloned()
            .collect();

        let low_stock = Product::find()
            .filter(Expr::col(product::Column::Quantity).lte(Expr::col(product::Column::MinStock)))
            .order_by_asc(product::Column::Quantity)
            .all(db)
            .await?;

        let outbound_order_count = OutboundOrder::find().count(db).await?;

        Ok(DashboardData {
            recent_movements,
            idle_products,
            low_stock,
            product_count: products.len() as u64,
            outbound_order_count,
        })
    }
}
