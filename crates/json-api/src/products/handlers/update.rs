//! Update Product Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use vitrine_app::domain::products::models::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Carries the `rowVersion` the caller last read; a stale value means
/// someone else updated the product first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub discount_percent: Option<i32>,
    #[serde(default)]
    pub purchase_price: Decimal,
    #[serde(default)]
    pub category_id: Option<i32>,
    pub row_version: i32,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            price: request.price,
            discount_percent: request.discount_percent,
            purchase_price: request.purchase_price,
            category_id: request.category_id,
            row_version: request.row_version,
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent update"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i32>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .update_product(id.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use vitrine_app::domain::products::{ProductsServiceError, models::Product};

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("products/{id}").put(handler))
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_update_product()
            .once()
            .withf(|id, update| *id == 5 && update.row_version == 2)
            .return_once(|id, update| {
                Ok(Product {
                    product_id: id,
                    title: update.title,
                    description: update.description,
                    price: update.price,
                    discount_percent: update.discount_percent,
                    purchase_price: update.purchase_price,
                    category_id: update.category_id,
                    row_version: update.row_version + 1,
                })
            });

        let mut res = TestClient::put("http://example.com/products/5")
            .json(&json!({ "title": "Shirt", "price": "24.99", "rowVersion": 2 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(body.price, Decimal::new(24_99, 2));
        assert_eq!(body.row_version, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_stale_version_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Conflict));

        let res = TestClient::put("http://example.com/products/5")
            .json(&json!({ "title": "Shirt", "price": "24.99", "rowVersion": 0 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put("http://example.com/products/4242")
            .json(&json!({ "title": "Ghost", "price": "1.00", "rowVersion": 0 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
