//! Checkout Models

use rust_decimal::Decimal;

/// The response summarising a completed order. Derived, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub order_id: i32,
    pub lines: Vec<ReceiptLine>,
    pub total: Decimal,
}

/// One priced line of a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub title: String,
    pub quantity: i32,
    pub size_label: Option<String>,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}
