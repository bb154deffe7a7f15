//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use vitrine_app::domain::products::models::Product;

/// Product on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub product_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_percent: Option<i32>,
    pub purchase_price: Decimal,
    pub category_id: Option<i32>,
    /// Echo this back in updates; a stale value is rejected with 409.
    pub row_version: i32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.product_id,
            title: product.title,
            description: product.description,
            price: product.price,
            discount_percent: product.discount_percent,
            purchase_price: product.purchase_price,
            category_id: product.category_id,
            row_version: product.row_version,
        }
    }
}
