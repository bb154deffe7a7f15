//! Cart Handlers

pub(crate) mod add;
pub(crate) mod checkout;
pub(crate) mod export;
pub(crate) mod get;
pub(crate) mod quantity;
pub(crate) mod remove;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use vitrine_app::domain::cart::CartLineItem;

/// One cart line on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineRequest {
    pub product_id: i32,
    pub quantity: i32,
    #[serde(default)]
    pub size_id: Option<i32>,
}

impl From<CartLineRequest> for CartLineItem {
    fn from(line: CartLineRequest) -> Self {
        Self {
            product_id: line.product_id,
            size_id: line.size_id,
            quantity: line.quantity,
        }
    }
}

/// Outcome of a cart mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartMutationResponse {
    pub success: bool,
    pub message: String,
}
