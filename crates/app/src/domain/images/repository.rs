//! Images Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::images::models::{ImageData, ImageMeta, NewImage};

const LIST_IMAGES_SQL: &str = include_str!("sql/list_images.sql");
const GET_IMAGE_DATA_SQL: &str = include_str!("sql/get_image_data.sql");
const CREATE_IMAGE_SQL: &str = include_str!("sql/create_image.sql");
const DELETE_IMAGE_SQL: &str = include_str!("sql/delete_image.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgImagesRepository;

impl PgImagesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ImageMeta>, sqlx::Error> {
        query_as::<Postgres, ImageMeta>(LIST_IMAGES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_image_data(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image_id: i32,
    ) -> Result<ImageData, sqlx::Error> {
        query_as::<Postgres, ImageData>(GET_IMAGE_DATA_SQL)
            .bind(image_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image: NewImage,
    ) -> Result<ImageMeta, sqlx::Error> {
        query_as::<Postgres, ImageMeta>(CREATE_IMAGE_SQL)
            .bind(image.product_id)
            .bind(image.title)
            .bind(image.content_type)
            .bind(image.data)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image_id: i32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_IMAGE_SQL)
            .bind(image_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ImageMeta {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            image_id: row.try_get("image_id")?,
            product_id: row.try_get("product_id")?,
            title: row.try_get("title")?,
            content_type: row.try_get("content_type")?,
            byte_len: i64::from(row.try_get::<i32, _>("byte_len")?),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ImageData {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            content_type: row.try_get("content_type")?,
            data: row.try_get("data")?,
        })
    }
}
