//! Catalog Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::catalog::models::{
    AttributeUpdate, NewAttribute, PricedAttribute, ProductAttribute,
};

const LIST_ATTRIBUTES_SQL: &str = include_str!("sql/list_attributes.sql");
const GET_ATTRIBUTE_SQL: &str = include_str!("sql/get_attribute.sql");
const CREATE_ATTRIBUTE_SQL: &str = include_str!("sql/create_attribute.sql");
const UPDATE_ATTRIBUTE_SQL: &str = include_str!("sql/update_attribute.sql");
const DELETE_ATTRIBUTE_SQL: &str = include_str!("sql/delete_attribute.sql");
const RESOLVE_ATTRIBUTE_SQL: &str = include_str!("sql/resolve_attribute.sql");
const LIST_PRICED_ATTRIBUTES_SQL: &str = include_str!("sql/list_priced_attributes.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Resolve the attribute for a cart line. An exact (product, size)
    /// match when a size is given; the product's first attribute otherwise.
    pub(crate) async fn resolve_attribute(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_id: i32,
        size_id: Option<i32>,
    ) -> Result<Option<PricedAttribute>, sqlx::Error> {
        query_as::<Postgres, PricedAttribute>(RESOLVE_ATTRIBUTE_SQL)
            .bind(product_id)
            .bind(size_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_priced_attributes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_ids: &[i32],
    ) -> Result<Vec<PricedAttribute>, sqlx::Error> {
        query_as::<Postgres, PricedAttribute>(LIST_PRICED_ATTRIBUTES_SQL)
            .bind(product_ids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_attributes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductAttribute>, sqlx::Error> {
        query_as::<Postgres, ProductAttribute>(LIST_ATTRIBUTES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_attribute(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        attribute_id: i32,
    ) -> Result<ProductAttribute, sqlx::Error> {
        query_as::<Postgres, ProductAttribute>(GET_ATTRIBUTE_SQL)
            .bind(attribute_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_attribute(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        attribute: NewAttribute,
    ) -> Result<ProductAttribute, sqlx::Error> {
        query_as::<Postgres, ProductAttribute>(CREATE_ATTRIBUTE_SQL)
            .bind(attribute.product_id)
            .bind(attribute.size_id)
            .bind(attribute.count)
            .bind(attribute.color_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_attribute(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        attribute_id: i32,
        update: AttributeUpdate,
    ) -> Result<Option<ProductAttribute>, sqlx::Error> {
        query_as::<Postgres, ProductAttribute>(UPDATE_ATTRIBUTE_SQL)
            .bind(attribute_id)
            .bind(update.size_id)
            .bind(update.count)
            .bind(update.color_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_attribute(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        attribute_id: i32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ATTRIBUTE_SQL)
            .bind(attribute_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductAttribute {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            attribute_id: row.try_get("attribute_id")?,
            product_id: row.try_get("product_id")?,
            size_id: row.try_get("size_id")?,
            count: row.try_get("count")?,
            color_id: row.try_get("color_id")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PricedAttribute {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            attribute_id: row.try_get("attribute_id")?,
            product_id: row.try_get("product_id")?,
            size_id: row.try_get("size_id")?,
            title: row.try_get("title")?,
            size_label: row.try_get("size_label")?,
            unit_price: row.try_get("price")?,
            available: row.try_get("count")?,
        })
    }
}
