//! Order Models

use jiff::Timestamp;
use rust_decimal::Decimal;

/// Order header. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub created_at: Timestamp,
    pub order_type: String,
}

/// One priced line to be written into an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub attribute_id: i32,
    pub quantity: i32,
    pub unit_cost: Decimal,
}

/// The persisted record of one priced line belonging to a committed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderComposition {
    pub order_id: i32,
    pub attribute_id: i32,
    pub quantity: i32,
    pub unit_cost: Decimal,
}

/// Composition row joined to its product title, for exports.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionDetail {
    pub title: String,
    pub quantity: i32,
    pub unit_cost: Decimal,
}
