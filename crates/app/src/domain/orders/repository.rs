//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::orders::models::{CompositionDetail, NewOrderLine, Order, OrderComposition};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_COMPOSITION_SQL: &str = include_str!("sql/create_composition.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_COMPOSITIONS_SQL: &str = include_str!("sql/list_compositions.sql");
const COMPOSITION_DETAILS_SQL: &str = include_str!("sql/composition_details.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: i32,
        order_type: &str,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(user_id)
            .bind(order_type)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_composition(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: i32,
        line: NewOrderLine,
    ) -> Result<(), sqlx::Error> {
        let quantity = try_into_quantity(line.quantity)?;

        query(CREATE_COMPOSITION_SQL)
            .bind(order_id)
            .bind(line.attribute_id)
            .bind(quantity)
            .bind(line.unit_cost)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: i32,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_compositions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: i32,
    ) -> Result<Vec<OrderComposition>, sqlx::Error> {
        query_as::<Postgres, OrderComposition>(LIST_COMPOSITIONS_SQL)
            .bind(order_id)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn composition_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: i32,
    ) -> Result<Vec<CompositionDetail>, sqlx::Error> {
        query_as::<Postgres, CompositionDetail>(COMPOSITION_DETAILS_SQL)
            .bind(order_id)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: i32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

// Composition quantities live in a SMALLINT column.
fn try_into_quantity(quantity: i32) -> Result<i16, sqlx::Error> {
    i16::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: "quantity".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_id: row.try_get("order_id")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            order_type: row.try_get("order_type")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderComposition {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i16 = row.try_get("quantity")?;

        Ok(Self {
            order_id: row.try_get("order_id")?,
            attribute_id: row.try_get("attribute_id")?,
            quantity: i32::from(quantity),
            unit_cost: row.try_get("unit_cost")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CompositionDetail {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i16 = row.try_get("quantity")?;

        Ok(Self {
            title: row.try_get("title")?,
            quantity: i32::from(quantity),
            unit_cost: row.try_get("unit_cost")?,
        })
    }
}
