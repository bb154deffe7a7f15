//! Checkout Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::header::AUTHORIZATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use vitrine_app::domain::{
    cart::Cart,
    checkout::{Receipt, ReceiptLine},
};

use crate::{
    cart::{
        cookie::CookieCartStore,
        errors::{cart_into_status_error, checkout_into_status_error},
        handlers::CartLineRequest,
    },
    extensions::*,
    state::State,
};

/// Name of the bearer token cookie.
pub(crate) const TOKEN_COOKIE: &str = "Token";

/// Priced receipt for a committed order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutResponse {
    pub order_id: i32,
    pub lines: Vec<ReceiptLineView>,
    pub total: Decimal,
}

/// One line of the receipt.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReceiptLineView {
    pub title: String,
    pub quantity: i32,
    pub size_label: Option<String>,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

impl From<ReceiptLine> for ReceiptLineView {
    fn from(line: ReceiptLine) -> Self {
        Self {
            title: line.title,
            quantity: line.quantity,
            size_label: line.size_label,
            unit_price: line.unit_price,
            total_price: line.total_price,
        }
    }
}

impl From<Receipt> for CheckoutResponse {
    fn from(receipt: Receipt) -> Self {
        Self {
            order_id: receipt.order_id,
            lines: receipt.lines.into_iter().map(ReceiptLineView::from).collect(),
            total: receipt.total,
        }
    }
}

/// Checkout Handler
///
/// Checks out the submitted cart lines: resolves the bearer credential,
/// prices every line, writes the order atomically, and expires the `Cart`
/// cookie. Any failure leaves both the database and the cookie untouched.
#[endpoint(
    tags("cart"),
    summary = "Checkout the cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order committed, receipt returned"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart, bad token, or unresolvable line"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Persistence failure"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<Vec<CartLineRequest>>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let lines: Vec<_> = json.into_inner().into_iter().map(Into::into).collect();

    // The submitted lines are the snapshot acted upon; bounds are enforced
    // here, before anything is resolved.
    let cart = Cart::from_lines(&lines).map_err(cart_into_status_error)?;

    let mut store = CookieCartStore::with_cart(cart);
    let credential = extract_credential(req);

    let receipt = state
        .app
        .checkout
        .checkout(&mut store, credential.as_deref())
        .await
        .map_err(checkout_into_status_error)?;

    // Completed: this is what expires the Cart cookie.
    store.apply(res, state.cart_ttl_days);

    Ok(Json(receipt.into()))
}

fn extract_credential(req: &Request) -> Option<String> {
    bearer_token(req)
        .map(ToString::to_string)
        .or_else(|| req.cookie(TOKEN_COOKIE).map(|cookie| cookie.value().to_string()))
}

fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
