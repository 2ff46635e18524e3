//! Supplier registry. RUC (tax id) is the natural key.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::supplier::{self, Entity as Supplier};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SupplierInput {
    #[validate(length(min = 1))]
    pub ruc: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct SupplierService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl SupplierService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input), fields(ruc = %input.ruc))]
    pub async fn create(&self, input: SupplierInput) -> Result<supplier::Model, ServiceError> {
        input.validate()?;

        if self.find_by_ruc(&input.ruc).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Supplier RUC {} already exists",
                input.ruc
            )));
        }

        let supplier = supplier::ActiveModel {
            ruc: Set(input.ruc),
            name: Set(input.name),
            address: Set(input.address),
            phone: Set(input.phone),
            email: Set(input.email),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db_pool.as_ref())
        .await?;

        info!(supplier_id = supplier.id, "supplier created");

        self.event_sender
            .send(Event::SupplierCreated(supplier.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(supplier)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: SupplierInput,
    ) -> Result<supplier::Model, ServiceError> {
        input.validate()?;

        let existing = self.get(id).await?;

        if input.ruc != existing.ruc {
            if let Some(other) = self.find_by_ruc(&input.ruc).await? {
                if other.id != id {
                    return Err(ServiceError::Conflict(format!(
                        "Supplier RUC {} already exists",
                        input.ruc
                    )));
                }
            }
        }

        let mut active: supplier::ActiveModel = existing.into();
        active.ruc = Set(input.ruc);
        active.name = Set(input.name);
        active.address = Set(input.address);
        active.phone = Set(input.phone);
        active.email = Set(input.email);
        let supplier = active.update(self.db_pool.as_ref()).await?;

        Ok(supplier)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let supplier = self.get(id).await?;
        Supplier::delete_by_id(supplier.id)
            .exec(self.db_pool.as_ref())
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<supplier::Model, ServiceError> {
        Supplier::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn find_by_ruc(&self, ruc: &str) -> Result<Option<supplier::Model>, ServiceError> {
        let supplier = Supplier::find()
            .filter(supplier::Column::Ruc.eq(ruc))
            .one(self.db_pool.as_ref())
            .await?;
        Ok(supplier)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        let suppliers = Supplier::find()
            .order_by_asc(supplier::Column::Name)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(suppliers)
    }
}
