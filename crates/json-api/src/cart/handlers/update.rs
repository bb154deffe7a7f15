//! Update Cart Handler

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

/// Update Cart Handler
///
/// Sets the quantity of a line outright, appending the line when absent.
#[endpoint(
    tags("cart"),
    summary = "Set a cart line's quantity",
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
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

    cart.set_quantity(request.product_id, request.size_id, request.quantity)
        .map_err(cart_into_status_error)?;

    store.put(cart);
    store.apply(res, state.cart_ttl_days);

    Ok(Json(CartMutationResponse {
        success: true,
        message: "Cart updated!".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{cart::cookie::CART_COOKIE, test_helpers::Mocks};

    use super::*;

    fn make_service() -> Service {
        Mocks::default().into_service(Router::with_path("cart/update").post(handler))
    }

    #[tokio::test]
    async fn test_update_replaces_quantity() -> TestResult {
        let res = TestClient::post("http://example.com/cart/update")
            .add_header(
                "cookie",
                r#"Cart=[{"productId":5,"sizeId":2,"quantity":60}]"#,
                true,
            )
            .json(&json!({ "productId": 5, "quantity": 2, "sizeId": 2 }))
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let cookie = res.cookies().get(CART_COOKIE).expect("cookie should be set");

        assert_eq!(cookie.value(), r#"[{"productId":5,"sizeId":2,"quantity":2}]"#);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_rejects_out_of_bounds_quantity() -> TestResult {
        let res = TestClient::post("http://example.com/cart/update")
            .json(&json!({ "productId": 5, "quantity": 101 }))
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_boundary_quantities_succeed() -> TestResult {
        for quantity in [1, 100] {
            let res = TestClient::post("http://example.com/cart/update")
                .json(&json!({ "productId": 5, "quantity": quantity }))
                .send(&make_service())
                .await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::OK),
                "quantity {quantity} should be accepted"
            );
        }

        Ok(())
    }
}
