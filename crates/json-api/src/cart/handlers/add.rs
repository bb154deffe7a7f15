//! Add To Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    cart::{
        cookie::CookieCartStore,
        errors::cart_into_status_error,
        handlers::{CartLineRequest, CartMutationResponse},
    },
    extensions::*,
    state::State,
};

use vitrine_app::domain::cart::CartStore;

/// Add To Cart Handler
///
/// Merges the line into the cookie-held cart, capping merged quantities.
#[endpoint(
    tags("cart"),
    summary = "Add a line to the cart",
    responses(
        (status_code = StatusCode::OK, description = "Product added to cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity out of bounds"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CartLineRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let mut store = CookieCartStore::from_request(req);
    let mut cart = store.get();

    cart.upsert(request.product_id, request.size_id, request.quantity)
        .map_err(cart_into_status_error)?;

    store.put(cart);
    store.apply(res, state.cart_ttl_days);

    Ok(Json(CartMutationResponse {
        success: true,
        message: "Product added to cart.".to_string(),
    }))
}
