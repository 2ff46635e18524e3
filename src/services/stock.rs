//! Stock ledger: the single place that mutates a product's on-hand
//! quantity.
//!
//! The quantity invariant lives here: it never goes negative. Callers
//! pick the withdrawal flavor — clamped for reconciliation discards and
//! order edits, checked for outbound dispatches that must not oversell.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::product::{self, Entity as Product};
use crate::errors::ServiceError;

/// Outcome of a stock mutation, carried into the `StockAdjusted` event.
#[derive(Debug, Clone, Copy)]
pub struct StockChange {
    pub product_id: i64,
    pub previous: i32,
    pub current: i32,
}

impl StockChange {
    pub fn delta(&self) -> i32 {
        self.current - self.previous
    }
}

async fn load_product<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
) -> Result<product::Model, ServiceError> {
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))
}

async fn store_quantity<C: ConnectionTrait>(
    db: &C,
    current: product::Model,
    new_quantity: i32,
) -> Result<StockChange, ServiceError> {
    let change = StockChange {
        product_id: current.id,
        previous: current.quantity,
        current: new_quantity,
    };

    let mut active: product::ActiveModel = current.into();
    active.quantity = Set(new_quantity);
    active.update(db).await?;

    Ok(change)
}

/// Add `quantity` units to the product's stock, saturating.
pub async fn deposit<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
    quantity: i32,
) -> Result<StockChange, ServiceError> {
    let product = load_product(db, product_id).await?;
    let new_quantity = product.quantity.saturating_add(quantity.max(0));
    store_quantity(db, product, new_quantity).await
}

/// Remove `quantity` units from the product's stock, clamped at zero.
pub async fn withdraw_clamped<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
    quantity: i32,
) -> Result<StockChange, ServiceError> {
    let product = load_product(db, product_id).await?;
    let new_quantity = (product.quantity - quantity.max(0)).max(0);
    store_quantity(db, product, new_quantity).await
}

/// Remove `quantity` units, rejecting the operation when the product
/// does not hold enough stock.
pub async fn withdraw_checked<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
    quantity: i32,
) -> Result<StockChange, ServiceError> {
    let product = load_product(db, product_id).await?;
    if product.quantity < quantity {
        return Err(ServiceError::InsufficientStock(format!(
            "{}: available {}, requested {}",
            product.name, product.quantity, quantity
        )));
    }
    let new_quantity = product.quantity - quantity;
    store_quantity(db, product, new_quantity).await
}

/// Apply a signed delta (used when re-saving an edited order), clamped
/// at zero.
pub async fn apply_delta<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
    delta: i32,
) -> Result<StockChange, ServiceError> {
    let product = load_product(db, product_id).await?;
    let new_quantity = product.quantity.saturating_add(delta).max(0);
    store_quantity(db, product, new_quantity).await
}
