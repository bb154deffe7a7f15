//! Checkout orchestrator.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    auth::AuthService,
    domain::{
        cart::CartStore,
        catalog::{CatalogService, CatalogServiceError},
        checkout::{
            errors::{CheckoutError, CheckoutPersistenceError},
            models::{Receipt, ReceiptLine},
        },
        orders::{OrdersService, models::NewOrderLine},
    },
};

/// Order type stamped on orders placed through the web checkout.
pub const ORDER_TYPE_WEBSITE: &str = "website";

/// Drives a checkout from cart snapshot to committed order.
///
/// The sequence is strict: validate the cart, resolve the caller's
/// identity, price every line, then write the order once. Any failure
/// before the write aborts with nothing persisted; the injected
/// [`CartStore`] is cleared only after the order has committed.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    auth: Arc<dyn AuthService>,
    catalog: Arc<dyn CatalogService>,
    orders: Arc<dyn OrdersService>,
}

impl CheckoutOrchestrator {
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthService>,
        catalog: Arc<dyn CatalogService>,
        orders: Arc<dyn OrdersService>,
    ) -> Self {
        Self {
            auth,
            catalog,
            orders,
        }
    }

    /// Run a checkout over the cart currently in `store`.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`] when the store holds no lines.
    /// - [`CheckoutError::Unauthenticated`] / [`CheckoutError::UserNotFound`]
    ///   when the credential does not resolve to a user.
    /// - [`CheckoutError::NotFound`] naming the offending (product, size)
    ///   when any line fails to resolve; no order is created.
    /// - [`CheckoutError::Persistence`] when a storage call fails.
    pub async fn checkout(
        &self,
        store: &mut dyn CartStore,
        credential: Option<&str>,
    ) -> Result<Receipt, CheckoutError> {
        // The snapshot taken here is the set of lines acted upon; later
        // store mutations are not honoured.
        let cart = store.get();

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let credential = credential.ok_or(CheckoutError::Unauthenticated)?;
        let identity = self.auth.resolve_identity(credential).await?;

        let mut order_lines = Vec::with_capacity(cart.len());
        let mut receipt_lines = Vec::with_capacity(cart.len());

        // Price in cart order so receipts are reproducible.
        for line in cart.lines() {
            let priced = match self
                .catalog
                .resolve_attribute(line.product_id, line.size_id)
                .await
            {
                Ok(priced) => priced,
                Err(CatalogServiceError::NotFound) => {
                    return Err(CheckoutError::NotFound {
                        product_id: line.product_id,
                        size_id: line.size_id,
                    });
                }
                Err(error) => {
                    return Err(CheckoutError::Persistence(CheckoutPersistenceError::Catalog(
                        error,
                    )));
                }
            };

            order_lines.push(NewOrderLine {
                attribute_id: priced.attribute_id,
                quantity: line.quantity,
                unit_cost: priced.unit_price,
            });

            receipt_lines.push(ReceiptLine {
                title: priced.title,
                quantity: line.quantity,
                size_label: priced.size_label,
                unit_price: priced.unit_price,
                total_price: priced.unit_price * Decimal::from(line.quantity),
            });
        }

        let order = self
            .orders
            .create_order(identity.user_id, ORDER_TYPE_WEBSITE, &order_lines)
            .await
            .map_err(|error| {
                CheckoutError::Persistence(CheckoutPersistenceError::Orders(error))
            })?;

        tracing::info!(
            order_id = order.order_id,
            lines = order_lines.len(),
            "checkout committed"
        );

        // Completed: the cart goes away only once the order is committed.
        store.clear();

        let total = receipt_lines.iter().map(|line| line.total_price).sum();

        Ok(Receipt {
            order_id: order.order_id,
            lines: receipt_lines,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mockall::{Sequence, predicate::eq};
    use testresult::TestResult;

    use crate::{
        auth::{AuthServiceError, Credentials, MockAuthService, UserIdentity},
        domain::{
            cart::{Cart, CartLineItem, MemoryCartStore},
            catalog::{MockCatalogService, models::PricedAttribute},
            orders::{MockOrdersService, OrdersServiceError, models::Order},
        },
        test::TestContext,
    };

    use super::*;

    fn identity() -> UserIdentity {
        UserIdentity {
            user_id: 7,
            username: "ada".to_string(),
        }
    }

    fn priced(attribute_id: i32, product_id: i32, cents: i64) -> PricedAttribute {
        PricedAttribute {
            attribute_id,
            product_id,
            size_id: Some(2),
            title: format!("Product {product_id}"),
            size_label: Some("M".to_string()),
            unit_price: Decimal::new(cents, 2),
            available: 10,
        }
    }

    fn order(order_id: i32) -> Order {
        Order {
            order_id,
            user_id: 7,
            created_at: Timestamp::UNIX_EPOCH,
            order_type: ORDER_TYPE_WEBSITE.to_string(),
        }
    }

    fn store_with(lines: &[CartLineItem]) -> MemoryCartStore {
        MemoryCartStore::with_cart(Cart::from_lines(lines).expect("lines should validate"))
    }

    fn orchestrator(
        auth: MockAuthService,
        catalog: MockCatalogService,
        orders: MockOrdersService,
    ) -> CheckoutOrchestrator {
        CheckoutOrchestrator::new(Arc::new(auth), Arc::new(catalog), Arc::new(orders))
    }

    #[tokio::test]
    async fn successful_checkout_returns_receipt_and_clears_cart() {
        let mut auth = MockAuthService::new();
        let mut catalog = MockCatalogService::new();
        let mut orders = MockOrdersService::new();

        auth.expect_resolve_identity()
            .once()
            .withf(|token| token == "token")
            .return_once(|_| Ok(identity()));

        catalog
            .expect_resolve_attribute()
            .once()
            .with(eq(5), eq(Some(2)))
            .return_once(|_, _| Ok(priced(11, 5, 19_99)));

        orders
            .expect_create_order()
            .once()
            .withf(|user_id, order_type, lines| {
                *user_id == 7
                    && order_type == ORDER_TYPE_WEBSITE
                    && lines
                        == [NewOrderLine {
                            attribute_id: 11,
                            quantity: 3,
                            unit_cost: Decimal::new(19_99, 2),
                        }]
            })
            .return_once(|_, _, _| Ok(order(42)));

        let mut store = store_with(&[CartLineItem {
            product_id: 5,
            size_id: Some(2),
            quantity: 3,
        }]);

        let receipt = orchestrator(auth, catalog, orders)
            .checkout(&mut store, Some("token"))
            .await
            .expect("checkout should succeed");

        assert_eq!(receipt.order_id, 42);
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].total_price, Decimal::new(59_97, 2));
        assert_eq!(receipt.total, Decimal::new(59_97, 2));
        assert!(store.get().is_empty(), "cart should be cleared on success");
    }

    #[tokio::test]
    async fn empty_cart_aborts_before_identity_resolution() {
        let mut auth = MockAuthService::new();
        let catalog = MockCatalogService::new();
        let orders = MockOrdersService::new();

        auth.expect_resolve_identity().never();

        let mut store = MemoryCartStore::new();

        let result = orchestrator(auth, catalog, orders)
            .checkout(&mut store, Some("token"))
            .await;

        assert!(
            matches!(result, Err(CheckoutError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
    }

    #[tokio::test]
    async fn missing_credential_aborts_without_clearing_cart() {
        let mut auth = MockAuthService::new();
        let catalog = MockCatalogService::new();
        let orders = MockOrdersService::new();

        auth.expect_resolve_identity().never();

        let lines = [CartLineItem {
            product_id: 5,
            size_id: Some(2),
            quantity: 3,
        }];
        let mut store = store_with(&lines);

        let result = orchestrator(auth, catalog, orders)
            .checkout(&mut store, None)
            .await;

        assert!(
            matches!(result, Err(CheckoutError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );
        assert_eq!(store.get().quantity_of(5, Some(2)), 3, "cart must survive");
    }

    #[tokio::test]
    async fn expired_credential_maps_to_unauthenticated() {
        let mut auth = MockAuthService::new();
        let catalog = MockCatalogService::new();
        let orders = MockOrdersService::new();

        auth.expect_resolve_identity()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let mut store = store_with(&[CartLineItem {
            product_id: 5,
            size_id: Some(2),
            quantity: 3,
        }]);

        let result = orchestrator(auth, catalog, orders)
            .checkout(&mut store, Some("stale"))
            .await;

        assert!(
            matches!(result, Err(CheckoutError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );
        assert!(!store.get().is_empty(), "cart must survive");
    }

    #[tokio::test]
    async fn unknown_subject_maps_to_user_not_found() {
        let mut auth = MockAuthService::new();
        let catalog = MockCatalogService::new();
        let orders = MockOrdersService::new();

        auth.expect_resolve_identity()
            .once()
            .return_once(|_| Err(AuthServiceError::UserNotFound));

        let mut store = store_with(&[CartLineItem {
            product_id: 5,
            size_id: Some(2),
            quantity: 3,
        }]);

        let result = orchestrator(auth, catalog, orders)
            .checkout(&mut store, Some("token"))
            .await;

        assert!(
            matches!(result, Err(CheckoutError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn one_unresolvable_line_aborts_the_whole_checkout() {
        let mut auth = MockAuthService::new();
        let mut catalog = MockCatalogService::new();
        let mut orders = MockOrdersService::new();

        auth.expect_resolve_identity()
            .once()
            .return_once(|_| Ok(identity()));

        let mut seq = Sequence::new();

        // Lines are priced in cart order; the second one is unknown.
        catalog
            .expect_resolve_attribute()
            .once()
            .with(eq(5), eq(Some(2)))
            .in_sequence(&mut seq)
            .return_once(|_, _| Ok(priced(11, 5, 19_99)));

        catalog
            .expect_resolve_attribute()
            .once()
            .with(eq(6), eq(None))
            .in_sequence(&mut seq)
            .return_once(|_, _| Err(CatalogServiceError::NotFound));

        orders.expect_create_order().never();

        let lines = [
            CartLineItem {
                product_id: 5,
                size_id: Some(2),
                quantity: 3,
            },
            CartLineItem {
                product_id: 6,
                size_id: None,
                quantity: 1,
            },
        ];
        let mut store = store_with(&lines);

        let result = orchestrator(auth, catalog, orders)
            .checkout(&mut store, Some("token"))
            .await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::NotFound {
                    product_id: 6,
                    size_id: None
                })
            ),
            "expected NotFound for (6, None), got {result:?}"
        );
        assert_eq!(store.get().len(), 2, "cart must survive an aborted checkout");
    }

    #[tokio::test]
    async fn order_writer_failure_surfaces_as_persistence() {
        let mut auth = MockAuthService::new();
        let mut catalog = MockCatalogService::new();
        let mut orders = MockOrdersService::new();

        auth.expect_resolve_identity()
            .once()
            .return_once(|_| Ok(identity()));

        catalog
            .expect_resolve_attribute()
            .once()
            .return_once(|_, _| Ok(priced(11, 5, 19_99)));

        orders
            .expect_create_order()
            .once()
            .return_once(|_, _, _| Err(OrdersServiceError::Sql(sqlx::Error::PoolClosed)));

        let mut store = store_with(&[CartLineItem {
            product_id: 5,
            size_id: Some(2),
            quantity: 3,
        }]);

        let result = orchestrator(auth, catalog, orders)
            .checkout(&mut store, Some("token"))
            .await;

        assert!(
            matches!(result, Err(CheckoutError::Persistence(_))),
            "expected Persistence, got {result:?}"
        );
        assert!(!store.get().is_empty(), "cart must survive");
    }

    #[tokio::test]
    async fn receipt_total_is_the_exact_decimal_sum() {
        let mut auth = MockAuthService::new();
        let mut catalog = MockCatalogService::new();
        let mut orders = MockOrdersService::new();

        auth.expect_resolve_identity()
            .once()
            .return_once(|_| Ok(identity()));

        catalog
            .expect_resolve_attribute()
            .with(eq(1), eq(None))
            .return_once(|_, _| Ok(priced(21, 1, 10)));

        catalog
            .expect_resolve_attribute()
            .with(eq(2), eq(None))
            .return_once(|_, _| Ok(priced(22, 2, 19_99)));

        orders
            .expect_create_order()
            .once()
            .return_once(|_, _, _| Ok(order(9)));

        // 3 x 0.10 + 1 x 19.99 = 20.29, exactly.
        let lines = [
            CartLineItem {
                product_id: 1,
                size_id: None,
                quantity: 3,
            },
            CartLineItem {
                product_id: 2,
                size_id: None,
                quantity: 1,
            },
        ];
        let mut store = store_with(&lines);

        let receipt = orchestrator(auth, catalog, orders)
            .checkout(&mut store, Some("token"))
            .await
            .expect("checkout should succeed");

        assert_eq!(receipt.total, Decimal::new(20_29, 2));
    }

    fn password_login(username: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: "password".to_string(),
        }
    }

    #[tokio::test]
    async fn checkout_commits_an_order_end_to_end() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_user("ada").await;

        let issued = ctx.auth.login(password_login("ada")).await?;

        let size = ctx.create_size("M").await;
        let product = ctx.create_product("Shirt", Decimal::new(19_99, 2)).await;

        ctx.create_attribute(product.product_id, Some(size.size_id))
            .await;

        let mut store = store_with(&[CartLineItem {
            product_id: product.product_id,
            size_id: Some(size.size_id),
            quantity: 3,
        }]);

        let receipt = ctx
            .checkout()
            .checkout(&mut store, Some(&issued.token))
            .await?;

        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].size_label.as_deref(), Some("M"));
        assert_eq!(receipt.total, Decimal::new(59_97, 2));
        assert!(store.get().is_empty(), "cart should be cleared on success");

        let compositions = ctx.orders.list_compositions(receipt.order_id).await?;

        assert_eq!(compositions.len(), 1);
        assert_eq!(compositions[0].unit_cost, Decimal::new(19_99, 2));

        Ok(())
    }

    #[tokio::test]
    async fn aborted_checkout_leaves_no_order_rows() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.create_user("ada").await;

        let issued = ctx.auth.login(password_login("ada")).await?;
        let product = ctx.create_product("Shirt", Decimal::new(19_99, 2)).await;

        ctx.create_attribute(product.product_id, None).await;

        let lines = [
            CartLineItem {
                product_id: product.product_id,
                size_id: None,
                quantity: 1,
            },
            CartLineItem {
                product_id: 4242,
                size_id: None,
                quantity: 1,
            },
        ];
        let mut store = store_with(&lines);

        let result = ctx
            .checkout()
            .checkout(&mut store, Some(&issued.token))
            .await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::NotFound {
                    product_id: 4242,
                    size_id: None
                })
            ),
            "expected NotFound for the unknown product, got {result:?}"
        );

        // Verified against the store directly: nothing was committed.
        let orders = ctx.orders.list_orders().await?;

        assert!(orders.is_empty(), "no order may exist after an abort");
        assert_eq!(store.get().len(), 2, "cart must survive the abort");

        Ok(())
    }
}
