//! Inventory reconciliation ("cuadre de inventario") workflow.
//!
//! Records are created `PENDIENTE` and transition exactly once:
//! confirm applies the stock delta and approves, discard rejects
//! without touching stock. Transitions out of a terminal state are
//! rejected, so an already-approved record can never double-apply its
//! delta.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set, TransactionTrait};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::reconciliation::{
    self, Entity as Reconciliation, ReconciliationAction, ReconciliationStatus,
};
use crate::entities::product::Entity as Product;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::stock::{self, StockChange};

/// Input for submitting a new reconciliation record.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReconciliation {
    pub product_id: i64,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub action: ReconciliationAction,
    pub expires_at: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct ReconciliationService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ReconciliationService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Submit a pending stock correction. No stock is mutated yet.
    #[instrument(skip(self))]
    pub async fn submit(
        &self,
        input: NewReconciliation,
    ) -> Result<reconciliation::Model, ServiceError> {
        input.validate()?;

        let db = self.db_pool.as_ref();

        Product::find_by_id(input.product_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product {} not found", input.product_id))
            })?;

        let record = reconciliation::ActiveModel {
            product_id: Set(input.product_id),
            quantity: Set(input.quantity),
            action: Set(input.action),
            status: Set(ReconciliationStatus::Pending),
            expires_at: Set(input.expires_at),
            notes: Set(input.notes),
            created_at: Set(Utc::now()),
            confirmed_at: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(record_id = record.id, "reconciliation submitted");

        self.event_sender
            .send(Event::ReconciliationSubmitted(record.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(record)
    }

    /// Confirm a pending record, applying its stock delta.
    ///
    /// `reingresar` adds the quantity back to stock; `descartar`
    /// removes it, clamped at zero. Record and product are updated in
    /// one transaction.
    #[instrument(skip(self))]
    pub async fn confirm(&self, id: i64) -> Result<reconciliation::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let (record, change) = db
            .transaction::<_, (reconciliation::Model, StockChange), ServiceError>(move |txn| {
                Box::pin(async move {
                    let record = find_pending(txn, id).await?;

                    let change = match record.action {
                        ReconciliationAction::Restock => {
                            stock::deposit(txn, record.product_id, record.quantity).await?
                        }
                        ReconciliationAction::Discard => {
                            stock::withdraw_clamped(txn, record.product_id, record.quantity)
                                .await?
                        }
                    };

                    let mut active: reconciliation::ActiveModel = record.into();
                    active.status = Set(ReconciliationStatus::Approved);
                    active.confirmed_at = Set(Some(Utc::now()));
                    let record = active.update(txn).await?;

                    Ok((record, change))
                })
            })
            .await
            .map_err(ServiceError::from)?;

        info!(
            record_id = record.id,
            product_id = change.product_id,
            previous = change.previous,
            current = change.current,
            "reconciliation confirmed"
        );

        self.event_sender
            .send(Event::StockAdjusted {
                product_id: change.product_id,
                previous: change.previous,
                current: change.current,
                reason: format!("Cuadre de inventario {}", record.id),
            })
            .await
            .map_err(ServiceError::EventError)?;
        self.event_sender
            .send(Event::ReconciliationApproved {
                record_id: record.id,
                product_id: change.product_id,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(record)
    }

    /// Discard a pending record. Stock is never mutated.
    #[instrument(skip(self))]
    pub async fn discard(&self, id: i64) -> Result<reconciliation::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let record = find_pending(db, id).await?;

        let mut active: reconciliation::ActiveModel = record.into();
        active.status = Set(ReconciliationStatus::Rejected);
        active.confirmed_at = Set(Some(Utc::now()));
        let record = active.update(db).await?;

        info!(record_id = record.id, "reconciliation discarded");

        self.event_sender
            .send(Event::ReconciliationRejected(record.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(record)
    }

    /// All records, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<reconciliation::Model>, ServiceError> {
        let records = Reconciliation::find()
            .order_by_desc(reconciliation::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(records)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<reconciliation::Model, ServiceError> {
        Reconciliation::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Reconciliation record {} not found", id))
            })
    }
}

/// Load a record and reject when it already reached a terminal state.
async fn find_pending<C>(db: &C, id: i64) -> Result<reconciliation::Model, ServiceError>
where
    C: sea_orm::ConnectionTrait,
{
    let record = Reconciliation::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Reconciliation record {} not found", id)))?;

    if record.is_settled() {
        return Err(ServiceError::InvalidOperation(format!(
            "Reconciliation record {} is already settled",
            id
        )));
    }

    Ok(record)
}
