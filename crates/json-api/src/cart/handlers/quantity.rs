//! Cart Quantity Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::cart::cookie::CookieCartStore;

use vitrine_app::domain::cart::CartStore;

/// Current quantity of one cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartQuantityResponse {
    pub current_quantity: i32,
}

/// Cart Quantity Handler
///
/// Reports the quantity currently in the cart for a (product, size) pair,
/// zero when the pair is absent.
#[endpoint(tags("cart"), summary = "Current quantity of a cart line")]
pub(crate) async fn handler(
    req: &mut Request,
) -> Result<Json<CartQuantityResponse>, StatusError> {
    let product_id = req
        .query::<i32>("productId")
        .ok_or_else(|| StatusError::bad_request().brief("productId is required"))?;
    let size_id = req.query::<i32>("sizeId");

    let store = CookieCartStore::from_request(req);

    Ok(Json(CartQuantityResponse {
        current_quantity: store.get().quantity_of(product_id, size_id),
    }))
}
