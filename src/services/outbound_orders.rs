//! Outbound distribution ("órdenes de salida") to beneficiaries.
//!
//! Dispatch is all-or-nothing: every line must be coverable by current
//! stock or the whole order is rejected. Each dispatched line leaves a
//! `SALIDA` journal entry; deleting an order restores stock and removes
//! its journal entries.

use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::inventory_movement::{self, Entity as InventoryMovement, MovementKind};
use crate::entities::outbound_order::{self, Entity as OutboundOrder};
use crate::entities::outbound_order_item::{self, Entity as OutboundOrderItem};
use crate::entities::product::Entity as Product;
use crate::entities::user::Entity as User;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::beneficiaries::find_or_create_by_dni;
use crate::services::numbering::{dispatch_batch_number, outbound_order_number, tramite_number};
use crate::services::order_lines::{valid_lines, OrderLineInput};
use crate::services::stock::{self, StockChange};

/// Input for dispatching an outbound order.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DispatchInput {
    pub dispatch_date: NaiveDate,
    #[validate(length(min = 1))]
    pub beneficiary_dni: String,
    #[validate(length(min = 1))]
    pub beneficiary_name: String,
    pub user_id: i64,
    pub description: Option<String>,
    pub items: Vec<OrderLineInput>,
}

#[derive(Clone)]
pub struct OutboundOrderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl OutboundOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Dispatch goods to a beneficiary.
    ///
    /// Finds or registers the beneficiary by DNI, allocates the order,
    /// dispatch and trámite numbers, withdraws stock per line (failing
    /// the whole order on any shortage) and journals one `SALIDA`
    /// movement per line.
    #[instrument(skip(self, input), fields(dni = %input.beneficiary_dni))]
    pub async fn dispatch(&self, input: DispatchInput) -> Result<outbound_order::Model, ServiceError> {
        input.validate()?;

        let lines = valid_lines(&input.items);
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "Order must contain at least one valid product line".into(),
            ));
        }

        let db = self.db_pool.as_ref();

        let (order, changes) = db
            .transaction::<_, (outbound_order::Model, Vec<StockChange>), ServiceError>(
                move |txn| {
                    Box::pin(async move {
                        User::find_by_id(input.user_id)
                            .one(txn)
                            .await?
                            .ok_or_else(|| {
                                ServiceError::ValidationError(format!(
                                    "User {} must exist",
                                    input.user_id
                                ))
                            })?;

                        let beneficiary = find_or_create_by_dni(
                            txn,
                            &input.beneficiary_dni,
                            &input.beneficiary_name,
                        )
                        .await?;

                        let order_count = OutboundOrder::find().count(txn).await?;
                        let month_scope =
                            format!("OS-{}-", input.dispatch_date.format("%Y-%m"));
                        let month_count = OutboundOrder::find()
                            .filter(
                                outbound_order::Column::DispatchNumber.starts_with(&month_scope),
                            )
                            .count(txn)
                            .await?;

                        let now = Utc::now();
                        let order = outbound_order::ActiveModel {
                            order_number: Set(outbound_order_number(
                                order_count,
                                input.dispatch_date.year(),
                            )),
                            dispatch_number: Set(dispatch_batch_number(
                                input.dispatch_date,
                                month_count,
                            )),
                            tramite_number: Set(tramite_number()),
                            dispatch_date: Set(input.dispatch_date),
                            beneficiary_dni: Set(input.beneficiary_dni.clone()),
                            beneficiary_name: Set(input.beneficiary_name.clone()),
                            beneficiary_id: Set(Some(beneficiary.id)),
                            user_id: Set(input.user_id),
                            delivered_count: Set(0),
                            description: Set(input.description.clone()),
                            created_at: Set(now),
                            updated_at: Set(Some(now)),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;

                        let mut changes = Vec::new();
                        let mut delivered = 0;
                        for line in &lines {
                            let change =
                                stock::withdraw_checked(txn, line.product_id, line.quantity)
                                    .await?;
                            changes.push(change);
                            delivered += line.quantity;

                            // Forms may omit the price; fall back to the
                            // product's registered unit price.
                            let unit_price = if line.unit_price > Decimal::ZERO {
                                line.unit_price
                            } else {
                                Product::find_by_id(line.product_id)
                                    .one(txn)
                                    .await?
                                    .map(|p| p.unit_price)
                                    .unwrap_or(Decimal::ZERO)
                            };

                            outbound_order_item::ActiveModel {
                                order_id: Set(order.id),
                                product_id: Set(line.product_id),
                                quantity: Set(line.quantity),
                                unit_price: Set(unit_price),
                                subtotal: Set(Decimal::from(line.quantity) * unit_price),
                                created_at: Set(now),
                                ..Default::default()
                            }
                            .insert(txn)
                            .await?;

                            inventory_movement::ActiveModel {
                                product_id: Set(line.product_id),
                                kind: Set(MovementKind::Outbound),
                                quantity: Set(line.quantity),
                                reason: Set(format!("Orden de salida: {}", order.order_number)),
                                user_id: Set(input.user_id),
                                outbound_order_id: Set(Some(order.id)),
                                moved_at: Set(now),
                                notes: Set(None),
                                ..Default::default()
                            }
                            .insert(txn)
                            .await?;
                        }

                        let mut active: outbound_order::ActiveModel = order.into();
                        active.delivered_count = Set(delivered);
                        let order = active.update(txn).await?;

                        Ok((order, changes))
                    })
                },
            )
            .await
            .map_err(ServiceError::from)?;

        info!(
            order_id = order.id,
            order_number = %order.order_number,
            delivered = order.delivered_count,
            "outbound order dispatched"
        );

        for change in &changes {
            self.event_sender
                .send(Event::StockAdjusted {
                    product_id: change.product_id,
                    previous: change.previous,
                    current: change.current,
                    reason: format!("Orden de salida {}", order.order_number),
                })
                .await
                .map_err(ServiceError::EventError)?;
        }
        self.event_sender
            .send(Event::OutboundOrderDispatched {
                order_id: order.id,
                order_number: order.order_number.clone(),
                dispatch_date: order.dispatch_date,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(order)
    }

    /// Delete a dispatched order, restoring the stock it withdrew and
    /// removing its journal entries.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();

        let (order_number, changes) = db
            .transaction::<_, (String, Vec<StockChange>), ServiceError>(move |txn| {
                Box::pin(async move {
                    let order = OutboundOrder::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Outbound order {} not found", id))
                        })?;

                    let items = OutboundOrderItem::find()
                        .filter(outbound_order_item::Column::OrderId.eq(id))
                        .all(txn)
                        .await?;
                    let mut changes = Vec::new();
                    for item in &items {
                        changes.push(stock::deposit(txn, item.product_id, item.quantity).await?);
                    }

                    OutboundOrderItem::delete_many()
                        .filter(outbound_order_item::Column::OrderId.eq(id))
                        .exec(txn)
                        .await?;
                    InventoryMovement::delete_many()
                        .filter(inventory_movement::Column::OutboundOrderId.eq(id))
                        .exec(txn)
                        .await?;
                    outbound_order::Entity::delete_by_id(order.id)
                        .exec(txn)
                        .await?;
                    Ok((order.order_number, changes))
                })
            })
            .await
            .map_err(ServiceError::from)?;

        for change in &changes {
            self.event_sender
                .send(Event::StockAdjusted {
                    product_id: change.product_id,
                    previous: change.previous,
                    current: change.current,
                    reason: format!("Anulación de orden de salida {}", order_number),
                })
                .await
                .map_err(ServiceError::EventError)?;
        }
        self.event_sender
            .send(Event::OutboundOrderDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    /// All orders, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<outbound_order::Model>, ServiceError> {
        let orders = OutboundOrder::find()
            .order_by_desc(outbound_order::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn get_with_items(
        &self,
        id: i64,
    ) -> Result<(outbound_order::Model, Vec<outbound_order_item::Model>), ServiceError> {
        let db = self.db_pool.as_ref();
        let order = OutboundOrder::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Outbound order {} not found", id)))?;
        let items = OutboundOrderItem::find()
            .filter(outbound_order_item::Column::OrderId.eq(id))
            .all(db)
            .await?;
        Ok((order, items))
    }

    /// Orders whose dispatch date falls inside `[from, to]`.
    #[instrument(skip(self))]
    pub async fn list_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<outbound_order::Model>, ServiceError> {
        let orders = OutboundOrder::find()
            .filter(outbound_order::Column::DispatchDate.gte(from))
            .filter(outbound_order::Column::DispatchDate.lte(to))
            .order_by_desc(outbound_order::Column::DispatchDate)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    /// Orders whose beneficiary DNI contains the fragment.
    #[instrument(skip(self))]
    pub async fn search_by_dni(
        &self,
        fragment: &str,
    ) -> Result<Vec<outbound_order::Model>, ServiceError> {
        let orders = OutboundOrder::find()
            .filter(outbound_order::Column::BeneficiaryDni.contains(fragment))
            .order_by_desc(outbound_order::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    /// Orders whose trámite number contains the fragment.
    #[instrument(skip(self))]
    pub async fn search_by_tramite(
        &self,
        fragment: &str,
    ) -> Result<Vec<outbound_order::Model>, ServiceError> {
        let orders = OutboundOrder::find()
            .filter(outbound_order::Column::TramiteNumber.contains(fragment))
            .order_by_desc(outbound_order::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn get_by_number(
        &self,
        order_number: &str,
    ) -> Result<Option<outbound_order::Model>, ServiceError> {
        let order = OutboundOrder::find()
            .filter(outbound_order::Column::OrderNumber.eq(order_number))
            .one(self.db_pool.as_ref())
            .await?;
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u64, ServiceError> {
        let count = OutboundOrder::find().count(self.db_pool.as_ref()).await?;
        Ok(count)
    }
}
