//! Remove From Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{cart::cookie::CookieCartStore, extensions::*, state::State};

use vitrine_app::domain::cart::CartStore;

/// The (product, size) pair to drop.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoveLineRequest {
    pub product_id: i32,
    #[serde(default)]
    pub size_id: Option<i32>,
}

/// Remove From Cart Handler
///
/// Dropping an absent line is a no-op, not an error.
#[endpoint(tags("cart"), summary = "Remove a line from the cart")]
pub(crate) async fn handler(
    json: JsonBody<RemoveLineRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let mut store = CookieCartStore::from_request(req);
    let mut cart = store.get();

    cart.remove(request.product_id, request.size_id);

    store.put(cart);
    store.apply(res, state.cart_ttl_days);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{cart::cookie::CART_COOKIE, test_helpers::Mocks};

    use super::*;

    fn make_service() -> Service {
        Mocks::default().into_service(Router::with_path("cart/remove").post(handler))
    }

    #[tokio::test]
    async fn test_remove_drops_the_matching_line() -> TestResult {
        let res = TestClient::post("http://example.com/cart/remove")
            .add_header(
                "cookie",
                r#"Cart=[{"productId":5,"sizeId":2,"quantity":3},{"productId":6,"quantity":1}]"#,
                true,
            )
            .json(&json!({ "productId": 5, "sizeId": 2 }))
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let cookie = res.cookies().get(CART_COOKIE).expect("cookie should be set");

        assert_eq!(cookie.value(), r#"[{"productId":6,"sizeId":null,"quantity":1}]"#);

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_of_absent_line_still_succeeds() -> TestResult {
        let res = TestClient::post("http://example.com/cart/remove")
            .json(&json!({ "productId": 9 }))
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
