//! Shared line-item input handling for order services.
//!
//! Items missing a product reference are silently dropped before any
//! total is computed; client-submitted totals are never trusted.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

/// A submitted order line. `product_id` is optional because web forms
/// routinely post empty rows; such rows are filtered, not rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderLineInput {
    pub product_id: Option<i64>,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl OrderLineInput {
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// A line that survived filtering: product reference present, positive
/// quantity, non-negative price.
#[derive(Debug, Clone)]
pub struct ValidLine {
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Drop lines without a usable product reference or with non-positive
/// quantity or negative price.
pub fn valid_lines(lines: &[OrderLineInput]) -> Vec<ValidLine> {
    lines
        .iter()
        .filter_map(|line| {
            let product_id = line.product_id?;
            if line.quantity <= 0 || line.unit_price < Decimal::ZERO {
                return None;
            }
            Some(ValidLine {
                product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: line.subtotal(),
            })
        })
        .collect()
}

/// Order total: sum of line subtotals. Zero lines means zero total.
pub fn order_total(lines: &[ValidLine]) -> Decimal {
    lines.iter().map(|line| line.subtotal).sum()
}
