//! Product Models

use rust_decimal::Decimal;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_percent: Option<i32>,
    pub purchase_price: Decimal,
    pub category_id: Option<i32>,
    /// Bumped on every update; stale writers get a conflict.
    pub row_version: i32,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_percent: Option<i32>,
    pub purchase_price: Decimal,
    pub category_id: Option<i32>,
}

/// Product Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_percent: Option<i32>,
    pub purchase_price: Decimal,
    pub category_id: Option<i32>,
    /// The row version the caller last read.
    pub row_version: i32,
}
