use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pending stock correction ("cuadre de inventario").
///
/// Created in `PENDIENTE` and moves exactly once to a terminal state:
/// `APROBADO` applies the stock delta, `RECHAZADO` leaves stock alone.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cuadre_inventario")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub action: ReconciliationAction,
    pub status: ReconciliationStatus,
    pub expires_at: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn is_settled(&self) -> bool {
        self.status != ReconciliationStatus::Pending
    }
}

/// What confirming the record does to the product's stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReconciliationAction {
    /// Add the quantity back to stock
    #[sea_orm(string_value = "reingresar")]
    Restock,
    /// Remove the quantity from stock, clamped at zero
    #[sea_orm(string_value = "descartar")]
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReconciliationStatus {
    #[sea_orm(string_value = "PENDIENTE")]
    Pending,
    #[sea_orm(string_value = "APROBADO")]
    Approved,
    #[sea_orm(string_value = "RECHAZADO")]
    Rejected,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
