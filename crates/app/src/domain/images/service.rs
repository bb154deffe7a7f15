//! Images service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::images::{
        errors::ImagesServiceError,
        models::{ImageData, ImageMeta, NewImage},
        repository::PgImagesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgImagesService {
    db: Db,
    repository: PgImagesRepository,
}

impl PgImagesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgImagesRepository::new(),
        }
    }
}

#[async_trait]
impl ImagesService for PgImagesService {
    async fn list_images(&self) -> Result<Vec<ImageMeta>, ImagesServiceError> {
        let mut tx = self.db.begin().await?;

        let images = self.repository.list_images(&mut tx).await?;

        tx.commit().await?;

        Ok(images)
    }

    async fn get_image_data(&self, image_id: i32) -> Result<ImageData, ImagesServiceError> {
        let mut tx = self.db.begin().await?;

        let image = self.repository.get_image_data(&mut tx, image_id).await?;

        tx.commit().await?;

        Ok(image)
    }

    async fn create_image(&self, image: NewImage) -> Result<ImageMeta, ImagesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_image(&mut tx, image).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_image(&self, image_id: i32) -> Result<(), ImagesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_image(&mut tx, image_id).await?;

        if rows_affected == 0 {
            return Err(ImagesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ImagesService: Send + Sync {
    /// Image metadata only; blobs never appear in listings.
    async fn list_images(&self) -> Result<Vec<ImageMeta>, ImagesServiceError>;

    /// The raw bytes of one image.
    async fn get_image_data(&self, image_id: i32) -> Result<ImageData, ImagesServiceError>;

    /// Stores a new image verbatim.
    async fn create_image(&self, image: NewImage) -> Result<ImageMeta, ImagesServiceError>;

    /// Deletes an image with the given id.
    async fn delete_image(&self, image_id: i32) -> Result<(), ImagesServiceError>;
}
