//! Purchase orders ("órdenes de compra"): paperwork for acquisitions.
//!
//! Unlike supply orders these never touch stock; goods enter the
//! warehouse through a supply order once they physically arrive.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::purchase_order::{self, Entity as PurchaseOrder};
use crate::entities::purchase_order_item::{self, Entity as PurchaseOrderItem};
use crate::entities::supplier::Entity as Supplier;
use crate::entities::{OrderKind, OrderStatus};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::numbering::{next_document_number, parse_sequence, DocumentStore};
use crate::services::order_lines::{order_total, valid_lines, OrderLineInput, ValidLine};

/// Input for creating or editing a purchase order. `id == None` creates.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PurchaseOrderInput {
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

/// Document-number store backed by the purchase order table.
pub(crate) struct PurchaseOrderNumbers<'a, C: ConnectionTrait> {
    pub db: &'a C,
}

#[async_trait]
impl<C: ConnectionTrait> DocumentStore for PurchaseOrderNumbers<'_, C> {
    async fn max_sequence(&self, prefix: &str, year: i32) -> Result<Option<u32>, ServiceError> {
        let scope = format!("{}-{}-", prefix, year);
        let orders = PurchaseOrder::find()
            .filter(purchase_order::Column::DocumentNumber.starts_with(&scope))
            .all(self.db)
            .await?;
        Ok(orders
            .iter()
            .filter_map(|o| parse_sequence(&o.document_number, prefix, year))
            .max())
    }

    async fn number_exists(&self, number: &str) -> Result<bool, ServiceError> {
        let count = PurchaseOrder::find()
            .filter(purchase_order::Column::DocumentNumber.eq(number))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }
}

#[derive(Clone)]
pub struct PurchaseOrderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl PurchaseOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Create or edit a purchase order with its items.
    ///
    /// An explicitly supplied document number on a new order must be
    /// unused; auto-assignment kicks in when none is given.
    #[instrument(skip(self, input), fields(order_id = ?input.id, kind = ?input.kind))]
    pub async fn save(
        &self,
        input: PurchaseOrderInput,
    ) -> Result<purchase_order::Model, ServiceError> {
        input.validate()?;

        let db = self.db_pool.as_ref();

        let order = db
            .transaction::<_, purchase_order::Model, ServiceError>(move |txn| {
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

                    let order = match input.id {
                        None => {
                            let store = PurchaseOrderNumbers { db: txn };
                            let number = match input.document_number.as_deref() {
                                Some(n) if !n.is_empty() => {
                                    if store.number_exists(n).await? {
                                        return Err(ServiceError::Conflict(format!(
                                            "Document number {} already exists",
                                            n
                                        )));
                                    }
                                    n.to_string()
                                }
                                _ => next_document_number(&store, input.kind).await?,
                            };

                            purchase_order::ActiveModel {
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
                            .await?
                        }
                        Some(id) => {
                            let existing = PurchaseOrder::find_by_id(id)
                                .one(txn)
                                .await?
                                .ok_or_else(|| {
                                    ServiceError::NotFound(format!(
                                        "Purchase order {} not found",
                                        id
                                    ))
                                })?;

                            PurchaseOrderItem::delete_many()
                                .filter(purchase_order_item::Column::OrderId.eq(id))
                                .exec(txn)
                                .await?;

                            let status = input.status.unwrap_or(existing.status);
                            let mut active: purchase_order::ActiveModel = existing.into();
                            active.order_date = Set(input.order_date);
                            active.kind = Set(input.kind);
                            active.supplier_id = Set(input.supplier_id);
                            active.user_id = Set(input.user_id);
                            active.status = Set(status);
                            active.total = Set(total);
                            active.notes = Set(input.notes.clone());
                            active.updated_at = Set(Some(now));
                            active.update(txn).await?
                        }
                    };

                    insert_items(txn, order.id, &lines).await?;

                    Ok(order)
                })
            })
            .await
            .map_err(ServiceError::from)?;

        info!(
            order_id = order.id,
            document_number = %order.document_number,
            total = %order.total,
            "purchase order saved"
        );

        self.event_sender
            .send(Event::PurchaseOrderSaved {
                order_id: order.id,
                document_number: order.document_number.clone(),
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(order)
    }

    /// Delete an order and its items.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let db = self.db_pool.as_ref();

        db.transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                let order = PurchaseOrder::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::NotFound(format!("Purchase order {} not found", id))
                    })?;

                PurchaseOrderItem::delete_many()
                    .filter(purchase_order_item::Column::OrderId.eq(id))
                    .exec(txn)
                    .await?;
                purchase_order::Entity::delete_by_id(order.id)
                    .exec(txn)
                    .await?;
                Ok(())
            })
        })
        .await
        .map_err(ServiceError::from)?;

        self.event_sender
            .send(Event::PurchaseOrderDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    /// All orders, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<purchase_order::Model>, ServiceError> {
        let orders = PurchaseOrder::find()
            .order_by_desc(purchase_order::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn get_with_items(
        &self,
        id: i64,
    ) -> Result<(purchase_order::Model, Vec<purchase_order_item::Model>), ServiceError> {
        let db = self.db_pool.as_ref();
        let order = PurchaseOrder::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {} not found", id)))?;
        let items = PurchaseOrderItem::find()
            .filter(purchase_order_item::Column::OrderId.eq(id))
            .all(db)
            .await?;
        Ok((order, items))
    }

    #[instrument(skip(self))]
    pub async fn list_by_kind(
        &self,
        kind: OrderKind,
    ) -> Result<Vec<purchase_order::Model>, ServiceError> {
        let orders = PurchaseOrder::find()
            .filter(purchase_order::Column::Kind.eq(kind))
            .order_by_desc(purchase_order::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<purchase_order::Model>, ServiceError> {
        let orders = PurchaseOrder::find()
            .filter(purchase_order::Column::Status.eq(status))
            .order_by_desc(purchase_order::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn number_exists(&self, number: &str) -> Result<bool, ServiceError> {
        let store = PurchaseOrderNumbers {
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
        purchase_order_item::ActiveModel {
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
