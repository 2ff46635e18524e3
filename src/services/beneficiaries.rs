//! Beneficiary registry. DNI (national id) is the natural key; outbound
//! dispatch registers unknown beneficiaries on the fly.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::beneficiary::{self, Entity as Beneficiary};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BeneficiaryInput {
    #[validate(length(min = 1))]
    pub dni: String,
    #[validate(length(min = 1))]
    pub first_names: String,
    pub last_names: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Look up a beneficiary by DNI, registering one when absent.
///
/// The display name is split on the first space: everything before it
/// becomes the first names, the rest the last names. Single-token names
/// leave last names empty.
pub async fn find_or_create_by_dni<C: ConnectionTrait>(
    db: &C,
    dni: &str,
    full_name: &str,
) -> Result<beneficiary::Model, ServiceError> {
    if let Some(existing) = Beneficiary::find()
        .filter(beneficiary::Column::Dni.eq(dni))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let mut parts = full_name.trim().splitn(2, ' ');
    let first_names = parts.next().unwrap_or("").to_string();
    let last_names = parts.next().map(|s| s.to_string());

    let beneficiary = beneficiary::ActiveModel {
        dni: Set(dni.to_string()),
        first_names: Set(first_names),
        last_names: Set(last_names),
        phone: Set(None),
        address: Set(None),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(beneficiary_id = beneficiary.id, %dni, "beneficiary registered at dispatch");

    Ok(beneficiary)
}

#[derive(Clone)]
pub struct BeneficiaryService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl BeneficiaryService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    #[instrument(skip(self, input), fields(dni = %input.dni))]
    pub async fn create(&self, input: BeneficiaryInput) -> Result<beneficiary::Model, ServiceError> {
        input.validate()?;

        if self.find_by_dni(&input.dni).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Beneficiary DNI {} already exists",
                input.dni
            )));
        }

        let beneficiary = beneficiary::ActiveModel {
            dni: Set(input.dni),
            first_names: Set(input.first_names),
            last_names: Set(input.last_names),
            phone: Set(input.phone),
            address: Set(input.address),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        }
        .insert(self.db_pool.as_ref())
        .await?;

        self.event_sender
            .send(Event::BeneficiaryCreated(beneficiary.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(beneficiary)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: BeneficiaryInput,
    ) -> Result<beneficiary::Model, ServiceError> {
        input.validate()?;

        let existing = self.get(id).await?;

        if input.dni != existing.dni {
            if let Some(other) = self.find_by_dni(&input.dni).await? {
                if other.id != id {
                    return Err(ServiceError::Conflict(format!(
                        "Beneficiary DNI {} already exists",
                        input.dni
                    )));
                }
            }
        }

        let mut active: beneficiary::ActiveModel = existing.into();
        active.dni = Set(input.dni);
        active.first_names = Set(input.first_names);
        active.last_names = Set(input.last_names);
        active.phone = Set(input.phone);
        active.address = Set(input.address);
        active.updated_at = Set(Some(Utc::now()));
        let beneficiary = active.update(self.db_pool.as_ref()).await?;

        Ok(beneficiary)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let beneficiary = self.get(id).await?;
        Beneficiary::delete_by_id(beneficiary.id)
            .exec(self.db_pool.as_ref())
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<beneficiary::Model, ServiceError> {
        Beneficiary::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Beneficiary {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn find_by_dni(&self, dni: &str) -> Result<Option<beneficiary::Model>, ServiceError> {
        let beneficiary = Beneficiary::find()
            .filter(beneficiary::Column::Dni.eq(dni))
            .one(self.db_pool.as_ref())
            .await?;
        Ok(beneficiary)
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<beneficiary::Model>, ServiceError> {
        let beneficiaries = Beneficiary::find()
            .order_by_asc(beneficiary::Column::FirstNames)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(beneficiaries)
    }
}
