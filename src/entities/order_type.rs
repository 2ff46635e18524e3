use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document kind shared by supply and purchase orders.
///
/// Each kind carries a fixed prefix used when generating document
/// numbers of the form `{PREFIX}-{YEAR}-{NNN}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum OrderKind {
    #[sea_orm(string_value = "SOLIDAS")]
    Solidas,
    #[sea_orm(string_value = "DONACIONES")]
    Donaciones,
    #[sea_orm(string_value = "U_OFICINA")]
    UtilesOficina,
    #[sea_orm(string_value = "INVENTARIO")]
    Inventario,
    #[sea_orm(string_value = "REPORTE")]
    Reporte,
    #[sea_orm(string_value = "R_DONACION")]
    ReporteDonacion,
    #[sea_orm(string_value = "R_UTILES")]
    ReporteUtiles,
    #[sea_orm(string_value = "R_TOTAL")]
    ReporteTotal,
}

impl OrderKind {
    /// Document-number prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            OrderKind::Solidas => "SOL",
            OrderKind::Donaciones => "DON",
            OrderKind::UtilesOficina => "UOF",
            OrderKind::Inventario => "INV",
            OrderKind::Reporte => "REP",
            OrderKind::ReporteDonacion => "RDON",
            OrderKind::ReporteUtiles => "RUT",
            OrderKind::ReporteTotal => "RTOT",
        }
    }
}

/// Lifecycle status of supply and purchase orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum OrderStatus {
    #[sea_orm(string_value = "PENDIENTE")]
    Pending,
    #[sea_orm(string_value = "APROBADA")]
    Approved,
    #[sea_orm(string_value = "RECHAZADA")]
    Rejected,
    #[sea_orm(string_value = "COMPLETADA")]
    Completed,
}
