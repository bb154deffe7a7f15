//! Catalog Models

use rust_decimal::Decimal;

/// A sellable variant of a product (e.g. one size) with its own stock count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAttribute {
    pub attribute_id: i32,
    pub product_id: i32,
    pub size_id: Option<i32>,
    pub count: i32,
    pub color_id: Option<i32>,
}

/// New Attribute Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttribute {
    pub product_id: i32,
    pub size_id: Option<i32>,
    pub count: i32,
    pub color_id: Option<i32>,
}

/// Attribute Update Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeUpdate {
    pub size_id: Option<i32>,
    pub count: i32,
    pub color_id: Option<i32>,
}

/// An attribute resolved for checkout: variant identity plus the current
/// price, title, and size label needed to build a receipt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedAttribute {
    pub attribute_id: i32,
    pub product_id: i32,
    pub size_id: Option<i32>,
    pub title: String,
    pub size_label: Option<String>,
    pub unit_price: Decimal,
    /// Current stock count. Checkout does not reserve stock; this is the
    /// seam for adding optimistic stock checks later.
    pub available: i32,
}
