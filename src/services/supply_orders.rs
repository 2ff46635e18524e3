//! Supply orders ("órdenes de abastecimiento"): incoming goods.
//!
//! Saving a new order deposits its line quantities into stock; saving
//! an edit applies the per-product delta against the previous item set.
//! The item set is replaced wholesale on every save.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::product::Entity as Product;
use crate::entities::supplier::Entity as Supplier;
use crate::entities::supply_order::{self, Entity as SupplyOrder};
use crate::entities::supply_order_item::{self, Entity as SupplyOrderItem};
use crate::entities::{OrderKind, OrderStatus};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::numbering::{next_document_number, parse_sequence, DocumentStore};
use crate::services::order_lines::{order_total, valid_lines, OrderLineInput, ValidLine};
use crate::services::stock::{self, StockChange};

/// Input for creating or editing a supply order. `id == None` creates.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SupplyOrderInput {
    pub id: Option<i64>,
    pub document_number: Option<String>,
    pub order_date: NaiveDate,
    pub kind: OrderKind,
    pub supplier_id: i64,
    pub user_id: i64,
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
    pub items: Vec<OrderLineInput>,
}

/// Document-number store backed by the supply order table.
pub(crate) struct SupplyOrderNumbers<'a, C: ConnectionTrait> {
    pub db: &'a C,
}

#[async_trait]
impl<C: ConnectionTrait> DocumentStore for SupplyOrderNumbers<'_, C> {
    async fn max_sequence(&self, prefix: &str, year: i32) -> Result<Option<u32>, ServiceError> {
        let scope = format!("{}-{}-", prefix, year);
        let orders = SupplyOrder::find()
            .filter(supply_order::Column::DocumentNumber.starts_with(&scope))
            .all(self.db)
            .await?;
        Ok(orders
            .iter()
            .filter_map(|o| parse_sequence(&o.document_number, prefix, year))
            .max())
    }

    async fn number_exists(&self, number: &str) -> Result<bool, ServiceError> {
        let count = SupplyOrder::find()
            .filter(supply_order::Column::DocumentNumber.eq(number))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }
}

#[derive(Clone)]
pub struct SupplyOrderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl SupplyOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Create or edit a supply order with its items, adjusting stock.
    #[instrument(skip(self, input), fields(order_id = ?input.id, kind = ?input.kind))]
    pub async fn save(&self, input: SupplyOrderInput) -> Result<supply_order::Model, ServiceError> {
        input.validate()?;

        let db = self.db_pool.as_ref();

        let (order, changes) = db
            .transaction::<_, (supply_order::Model, Vec<StockChange>), ServiceError>(
                move |txn| {
                    Box::pin(async move {
                        Supplier::find_by_id(input.supplier_id)
                            .one(txn)
                            .await?
                            .ok_or_else(|| {
                                ServiceError::ValidationError(format!(
                                    "Supplier {} is required and must exist",
                                    input.supplier_id
                                ))
                            })?;

                        let lines = valid_lines(&input.items);
                        if !input.items.is_empty() && lines.is_empty() {
                            return Err(ServiceError::ValidationError(
                                "Order must contain at least one valid product line".into(),
                            ));
                        }
                        let total = order_total(&lines);
                        let now = Utc::now();

                        let (order, previous_items) = match input.id {
                            None => {
                                let number = match input.document_number.as_deref() {
                                    Some(n) if !n.is_empty() => n.to_string(),
                                    _ => {
                                        let store = SupplyOrderNumbers { db: txn };
                                        next_document_number(&store, input.kind).await?
                                    }
                                };

                                let order = supply_order::ActiveModel {
                                    document_number: Set(number),
                                    order_date: Set(input.order_date),
                                    kind: Set(input.kind),
                                    supplier_id: Set(input.supplier_id),
                                    user_id: Set(input.user_id),
                                    status: Set(input.status.unwrap_or(OrderStatus::Pending)),
                                    total: Set(total),
                                    notes: Set(input.notes.clone()),
                                    created_at: Set(now),
                                    updated_at: Set(Some(now)),
                                    ..Default::default()
                                }
                                .insert(txn)
                                .await?;

                                (order, Vec::new())
                            }
                            Some(id) => {
                                let existing = SupplyOrder::find_by_id(id)
                                    .one(txn)
                                    .await?
                                    .ok_or_else(|| {
                                        ServiceError::NotFound(format!(
                                            "Supply order {} not found",
                                            id
                                        ))
                                    })?;

                                let previous_items = SupplyOrderItem::find()
                                    .filter(supply_order_item::Column::OrderId.eq(id))
                                    .all(txn)
                                    .await?;
                                SupplyOrderItem::delete_many()
                                    .filter(supply_order_item::Column::OrderId.eq(id))
                                    .exec(txn)
                                    .await?;

                                let status = input.status.unwrap_or(existing.status);
                                let mut active: supply_order::ActiveModel = existing.into();
                                active.order_date = Set(input.order_date);
                                active.kind = Set(input.kind);
                                active.supplier_id = Set(input.supplier_id);
                                active.user_id = Set(input.user_id);
                                active.status = Set(status);
                                active.total = Set(total);
                                active.notes = Set(input.notes.clone());
                                active.updated_at = Set(Some(now));
                                let order = active.update(txn).await?;

                                (order, previous_items)
                            }
                        };

                        insert_items(txn, order.id, &lines).await?;

                        let changes = if previous_items.is_empty() && input.id.is_none() {
                            apply_new_order_stock(txn, &lines).await?
                        } else {
                            apply_edit_stock(txn, &previous_items, &lines).await?
                        };

                        Ok((order, changes))
                    })
                },
            )
            .await
            .map_err(ServiceError::from)?;

        info!(
            order_id = order.id,
            document_number = %order.document_number,
            total = %order.total,
            "supply order saved"
        );

        for change in &changes {
            self.event_sender
                .send(Event::StockAdjusted {
                    product_id: change.product_id,
                    previous: change.previous,
                    current: change.current,
                    reason: format!("Orden de abastecimiento {}", order.document_number),
                })
                .await
                .map_err(ServiceError::EventError)?;
        }
        self.event_sender
            .send(Event::SupplyOrderSaved {
                order_id: order.id,
                document_number: order.document_number.clone(),
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(order)
    }

    /// Delete an order and its items. Stock is not compensated.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();

        db.transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                let order = SupplyOrder::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Supply order {} not found", id))
                    })?;

                SupplyOrderItem::delete_many()
                    .filter(supply_order_item::Column::OrderId.eq(id))
                    .exec(txn)
                    .await?;
                supply_order::Entity::delete_by_id(order.id).exec(txn).await?;
                Ok(())
            })
        })
        .await
        .map_err(ServiceError::from)?;

        self.event_sender
            .send(Event::SupplyOrderDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    /// All orders, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<supply_order::Model>, ServiceError> {
        let orders = SupplyOrder::find()
            .order_by_desc(supply_order::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    /// One order with its items, product-less rows already filtered at
    /// write time.
    #[instrument(skip(self))]
    pub async fn get_with_items(
        &self,
        id: i64,
    ) -> Result<(supply_order::Model, Vec<supply_order_item::Model>), ServiceError> {
        let db = self.db_pool.as_ref();
        let order = SupplyOrder::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Supply order {} not found", id)))?;
        let items = SupplyOrderItem::find()
            .filter(supply_order_item::Column::OrderId.eq(id))
            .all(db)
            .await?;
        Ok((order, items))
    }

    #[instrument(skip(self))]
    pub async fn list_by_kind(
        &self,
        kind: OrderKind,
    ) -> Result<Vec<supply_order::Model>, ServiceError> {
        let orders = SupplyOrder::find()
            .filter(supply_order::Column::Kind.eq(kind))
            .order_by_desc(supply_order::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<supply_order::Model>, ServiceError> {
        let orders = SupplyOrder::find()
            .filter(supply_order::Column::Status.eq(status))
            .order_by_desc(supply_order::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn list_pending(&self) -> Result<Vec<supply_order::Model>, ServiceError> {
        self.list_by_status(OrderStatus::Pending).await
    }

    /// Orders whose order date falls in the current month.
    #[instrument(skip(self))]
    pub async fn list_current_month(&self) -> Result<Vec<supply_order::Model>, ServiceError> {
        let today = Utc::now().date_naive();
        let month_start = today.with_day(1).unwrap_or(today);
        let next_month = if month_start.month() == 12 {
            month_start
                .with_year(month_start.year() + 1)
                .and_then(|d| d.with_month(1))
        } else {
            month_start.with_month(month_start.month() + 1)
        }
        .unwrap_or(today);

        let orders = SupplyOrder::find()
            .filter(supply_order::Column::OrderDate.gte(month_start))
            .filter(supply_order::Column::OrderDate.lt(next_month))
            .order_by_desc(supply_order::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn number_exists(&self, number: &str) -> Result<bool, ServiceError> {
        let store = SupplyOrderNumbers {
            db: self.db_pool.as_ref(),
        };
        store.number_exists(number).await
    }
}

async fn insert_items<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
    lines: &[ValidLine],
) -> Result<(), ServiceError> {
    let now = Utc::now();
    for line in lines {
        supply_order_item::ActiveModel {
            order_id: Set(order_id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            subtotal: Set(line.subtotal),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// New orders deposit every line quantity into stock and refresh the
/// product's unit price when a positive price was given.
async fn apply_new_order_stock<C: ConnectionTrait>(
    db: &C,
    lines: &[ValidLine],
) -> Result<Vec<StockChange>, ServiceError> {
    let mut changes = Vec::new();
    for line in lines {
        changes.push(stock::deposit(db, line.product_id, line.quantity).await?);
        refresh_unit_price(db, line.product_id, line.unit_price).await?;
    }
    Ok(changes)
}

/// Edits apply the difference between the edited and the previous
/// quantity per product, clamped at zero.
async fn apply_edit_stock<C: ConnectionTrait>(
    db: &C,
    previous_items: &[supply_order_item::Model],
    lines: &[ValidLine],
) -> Result<Vec<StockChange>, ServiceError> {
    let mut previous_qty: HashMap<i64, i32> = HashMap::new();
    for item in previous_items {
        *previous_qty.entry(item.product_id).or_insert(0) += item.quantity;
    }

    let mut changes = Vec::new();
    for line in lines {
        let before = previous_qty.get(&line.product_id).copied().unwrap_or(0);
        let delta = line.quantity - before;
        if delta != 0 {
            changes.push(stock::apply_delta(db, line.product_id, delta).await?);
        }
        refresh_unit_price(db, line.product_id, line.unit_price).await?;
    }
    Ok(changes)
}

async fn refresh_unit_price<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
    price: Decimal,
) -> Result<(), ServiceError> {
    if price <= Decimal::ZERO {
        return Ok(());
    }
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))?;
    if product.unit_price != price {
        let mut active: crate::entities::product::ActiveModel = product.into();
        active.unit_price = Set(price);
        active.update(db).await?;
    }
    Ok(())
}
