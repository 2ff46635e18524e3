use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Journal entry for a stock movement.
///
/// Written when outbound orders are dispatched; `outbound_order_id`
/// links the movement back to its originating dispatch.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movimientos_inventario")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_id: i64,
    pub kind: MovementKind,
    pub quantity: i32,
    pub reason: String,
    pub user_id: i64,
    pub outbound_order_id: Option<i64>,
    pub moved_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MovementKind {
    #[sea_orm(string_value = "ENTRADA")]
    Inbound,
    #[sea_orm(string_value = "SALIDA")]
    Outbound,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::outbound_order::Entity",
        from = "Column::OutboundOrderId",
        to = "super::outbound_order::Column::Id"
    )]
    OutboundOrder,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
