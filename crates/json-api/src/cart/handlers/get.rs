//! Get Cart Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use vitrine_app::domain::{
    cart::CartLineItem,
    catalog::models::PricedAttribute,
    products::models::Product,
};

use crate::{
    cart::cookie::CookieCartStore,
    extensions::*,
    state::State,
};

use vitrine_app::domain::cart::CartStore;

/// Cart view: the cookie's lines plus the matching catalog records.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartView {
    pub items: Vec<CartItemView>,
    pub products: Vec<CartProductView>,
}

/// One cookie-held cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemView {
    pub product_id: i32,
    pub size_id: Option<i32>,
    pub quantity: i32,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product_id: line.product_id,
            size_id: line.size_id,
            quantity: line.quantity,
        }
    }
}

/// A product referenced by the cart, with its sellable variants.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartProductView {
    pub product_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_percent: Option<i32>,
    pub attributes: Vec<CartAttributeView>,
}

/// One sellable variant of a cart product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartAttributeView {
    pub attribute_id: i32,
    pub size_id: Option<i32>,
    pub size_label: Option<String>,
    pub count: i32,
}

impl From<&PricedAttribute> for CartAttributeView {
    fn from(attribute: &PricedAttribute) -> Self {
        Self {
            attribute_id: attribute.attribute_id,
            size_id: attribute.size_id,
            size_label: attribute.size_label.clone(),
            count: attribute.available,
        }
    }
}

fn product_view(product: Product, attributes: &[PricedAttribute]) -> CartProductView {
    let attributes = attributes
        .iter()
        .filter(|attribute| attribute.product_id == product.product_id)
        .map(CartAttributeView::from)
        .collect();

    CartProductView {
        product_id: product.product_id,
        title: product.title,
        description: product.description,
        price: product.price,
        discount_percent: product.discount_percent,
        attributes,
    }
}

/// Get Cart Handler
///
/// Returns the cookie-held cart together with the referenced products and
/// their variants.
#[endpoint(
    tags("cart"),
    summary = "Get the cart with product details",
    responses(
        (status_code = StatusCode::OK, description = "Cart view"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartView>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let store = CookieCartStore::from_request(req);
    let cart = store.get();

    let mut product_ids: Vec<i32> = cart.lines().iter().map(|line| line.product_id).collect();

    product_ids.sort_unstable();
    product_ids.dedup();

    let products = state
        .app
        .products
        .list_products_by_ids(&product_ids)
        .await
        .map_err(crate::products::errors::into_status_error)?;

    let attributes = state
        .app
        .catalog
        .list_priced_attributes(&product_ids)
        .await
        .map_err(crate::attributes::into_status_error)?;

    Ok(Json(CartView {
        items: cart.lines().iter().map(CartItemView::from).collect(),
        products: products
            .into_iter()
            .map(|product| product_view(product, &attributes))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn shirt() -> Product {
        Product {
            product_id: 5,
            title: "Shirt".to_string(),
            description: None,
            price: Decimal::new(19_99, 2),
            discount_percent: None,
            purchase_price: Decimal::ZERO,
            category_id: None,
            row_version: 0,
        }
    }

    fn shirt_attribute() -> PricedAttribute {
        PricedAttribute {
            attribute_id: 11,
            product_id: 5,
            size_id: Some(2),
            title: "Shirt".to_string(),
            size_label: Some("M".to_string()),
            unit_price: Decimal::new(19_99, 2),
            available: 4,
        }
    }

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_joins_cart_lines_with_products() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products_by_ids()
            .once()
            .withf(|ids| ids == [5])
            .return_once(|_| Ok(vec![shirt()]));

        mocks
            .catalog
            .expect_list_priced_attributes()
            .once()
            .withf(|ids| ids == [5])
            .return_once(|_| Ok(vec![shirt_attribute()]));

        let mut res = TestClient::get("http://example.com/cart")
            .add_header(
                "cookie",
                r#"Cart=[{"productId":5,"sizeId":2,"quantity":3}]"#,
                true,
            )
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let view: CartView = res.take_json().await?;

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 3);
        assert_eq!(view.products.len(), 1);
        assert_eq!(view.products[0].title, "Shirt");
        assert_eq!(view.products[0].attributes.len(), 1);
        assert_eq!(view.products[0].attributes[0].size_label.as_deref(), Some("M"));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_with_no_cookie_returns_empty_view() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_products_by_ids()
            .once()
            .withf(|ids| ids.is_empty())
            .return_once(|_| Ok(vec![]));

        mocks
            .catalog
            .expect_list_priced_attributes()
            .once()
            .withf(|ids| ids.is_empty())
            .return_once(|_| Ok(vec![]));

        let mut res = TestClient::get("http://example.com/cart")
            .send(&make_service(mocks))
            .await;

        let view: CartView = res.take_json().await?;

        assert!(view.items.is_empty());
        assert!(view.products.is_empty());

        Ok(())
    }
}
