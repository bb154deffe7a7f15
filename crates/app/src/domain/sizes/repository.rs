//! Sizes Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::sizes::models::Size;

const LIST_SIZES_SQL: &str = include_str!("sql/list_sizes.sql");
const GET_SIZE_SQL: &str = include_str!("sql/get_size.sql");
const CREATE_SIZE_SQL: &str = include_str!("sql/create_size.sql");
const UPDATE_SIZE_SQL: &str = include_str!("sql/update_size.sql");
const DELETE_SIZE_SQL: &str = include_str!("sql/delete_size.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSizesRepository;

impl PgSizesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_sizes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Size>, sqlx::Error> {
        query_as::<Postgres, Size>(LIST_SIZES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_size(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        size_id: i32,
    ) -> Result<Size, sqlx::Error> {
        query_as::<Postgres, Size>(GET_SIZE_SQL)
            .bind(size_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_size(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        label: &str,
    ) -> Result<Size, sqlx::Error> {
        query_as::<Postgres, Size>(CREATE_SIZE_SQL)
            .bind(label)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_size(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        size_id: i32,
        label: &str,
    ) -> Result<Option<Size>, sqlx::Error> {
        query_as::<Postgres, Size>(UPDATE_SIZE_SQL)
            .bind(size_id)
            .bind(label)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_size(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        size_id: i32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SIZE_SQL)
            .bind(size_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Size {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            size_id: row.try_get("size_id")?,
            label: row.try_get("label")?,
        })
    }
}
