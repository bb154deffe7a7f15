//! Orders service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::orders::{
        errors::OrdersServiceError,
        models::{CompositionDetail, NewOrderLine, Order, OrderComposition},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        user_id: i32,
        order_type: &str,
        lines: &[NewOrderLine],
    ) -> Result<Order, OrdersServiceError> {
        if lines.is_empty() {
            return Err(OrdersServiceError::InvalidData);
        }

        // Header and every composition row commit together or not at all;
        // any failed insert drops the transaction and rolls the rest back.
        let mut tx = self.db.begin().await?;

        let order = self
            .repository
            .create_order(&mut tx, user_id, order_type)
            .await?;

        for line in lines {
            self.repository
                .create_composition(&mut tx, order.order_id, *line)
                .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(&self, order_id: i32) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order_id).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_compositions(
        &self,
        order_id: i32,
    ) -> Result<Vec<OrderComposition>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let compositions = self.repository.list_compositions(&mut tx, order_id).await?;

        tx.commit().await?;

        Ok(compositions)
    }

    async fn composition_details(
        &self,
        order_id: i32,
    ) -> Result<Vec<CompositionDetail>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let details = self
            .repository
            .composition_details(&mut tx, order_id)
            .await?;

        tx.commit().await?;

        Ok(details)
    }

    async fn delete_order(&self, order_id: i32) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order_id).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Atomically creates an order header plus one composition row per
    /// line. Either everything persists or nothing does.
    async fn create_order(
        &self,
        user_id: i32,
        order_type: &str,
        lines: &[NewOrderLine],
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieves all orders.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, order_id: i32) -> Result<Order, OrdersServiceError>;

    /// The composition rows of an order.
    async fn list_compositions(
        &self,
        order_id: i32,
    ) -> Result<Vec<OrderComposition>, OrdersServiceError>;

    /// Composition rows joined to product titles, for exports.
    async fn composition_details(
        &self,
        order_id: i32,
    ) -> Result<Vec<CompositionDetail>, OrdersServiceError>;

    /// Deletes an order and, via cascade, its composition rows.
    async fn delete_order(&self, order_id: i32) -> Result<(), OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_order_persists_header_and_compositions() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.create_user("ada").await;
        let product = ctx.create_product("Shirt", Decimal::new(19_99, 2)).await;
        let attribute = ctx.create_attribute(product.product_id, None).await;

        let order = ctx
            .orders
            .create_order(
                user.user_id,
                "website",
                &[NewOrderLine {
                    attribute_id: attribute.attribute_id,
                    quantity: 3,
                    unit_cost: Decimal::new(19_99, 2),
                }],
            )
            .await?;

        assert_eq!(order.user_id, user.user_id);
        assert_eq!(order.order_type, "website");

        let compositions = ctx.orders.list_compositions(order.order_id).await?;

        assert_eq!(compositions.len(), 1);
        assert_eq!(compositions[0].quantity, 3);
        assert_eq!(compositions[0].unit_cost, Decimal::new(19_99, 2));

        Ok(())
    }

    #[tokio::test]
    async fn failed_composition_rolls_back_the_whole_order() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.create_user("ada").await;
        let product = ctx.create_product("Shirt", Decimal::new(19_99, 2)).await;
        let attribute = ctx.create_attribute(product.product_id, None).await;

        let lines = [
            NewOrderLine {
                attribute_id: attribute.attribute_id,
                quantity: 1,
                unit_cost: Decimal::new(19_99, 2),
            },
            // Unknown attribute: the insert fails on the FK.
            NewOrderLine {
                attribute_id: 4242,
                quantity: 1,
                unit_cost: Decimal::new(19_99, 2),
            },
        ];

        let result = ctx.orders.create_order(user.user_id, "website", &lines).await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        // No header survived the rollback.
        let orders = ctx.orders.list_orders().await?;

        assert!(orders.is_empty(), "no order should exist after rollback");

        Ok(())
    }

    #[tokio::test]
    async fn create_order_without_lines_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.create_user("ada").await;

        let result = ctx.orders.create_order(user.user_id, "website", &[]).await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn composition_details_join_product_titles() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.create_user("ada").await;
        let product = ctx.create_product("Shirt", Decimal::new(19_99, 2)).await;
        let attribute = ctx.create_attribute(product.product_id, None).await;

        let order = ctx
            .orders
            .create_order(
                user.user_id,
                "website",
                &[NewOrderLine {
                    attribute_id: attribute.attribute_id,
                    quantity: 2,
                    unit_cost: Decimal::new(19_99, 2),
                }],
            )
            .await?;

        let details = ctx.orders.composition_details(order.order_id).await?;

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].title, "Shirt");
        assert_eq!(details[0].quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn delete_order_cascades_to_compositions() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.create_user("ada").await;
        let product = ctx.create_product("Shirt", Decimal::new(19_99, 2)).await;
        let attribute = ctx.create_attribute(product.product_id, None).await;

        let order = ctx
            .orders
            .create_order(
                user.user_id,
                "website",
                &[NewOrderLine {
                    attribute_id: attribute.attribute_id,
                    quantity: 1,
                    unit_cost: Decimal::new(19_99, 2),
                }],
            )
            .await?;

        ctx.orders.delete_order(order.order_id).await?;

        let result = ctx.orders.get_order(order.order_id).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let compositions = ctx.orders.list_compositions(order.order_id).await?;

        assert!(compositions.is_empty(), "compositions should cascade away");

        Ok(())
    }
}
