//! sea-orm entities for the warehouse schema.
//!
//! Table names keep the deployed Spanish schema; Rust identifiers are
//! English.

pub mod beneficiary;
pub mod inventory_movement;
pub mod order_type;
pub mod outbound_order;
pub mod outbound_order_item;
pub mod product;
pub mod purchase_order;
pub mod purchase_order_item;
pub mod reconciliation;
pub mod role;
pub mod supplier;
pub mod supply_order;
pub mod supply_order_item;
pub mod user;
pub mod user_role;

pub use order_type::{OrderKind, OrderStatus};
