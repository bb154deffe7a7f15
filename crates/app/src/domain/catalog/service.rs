//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{AttributeUpdate, NewAttribute, PricedAttribute, ProductAttribute},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn resolve_attribute(
        &self,
        product_id: i32,
        size_id: Option<i32>,
    ) -> Result<PricedAttribute, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let resolved = self
            .repository
            .resolve_attribute(&mut tx, product_id, size_id)
            .await?;

        tx.commit().await?;

        resolved.ok_or(CatalogServiceError::NotFound)
    }

    async fn list_priced_attributes(
        &self,
        product_ids: &[i32],
    ) -> Result<Vec<PricedAttribute>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let attributes = self
            .repository
            .list_priced_attributes(&mut tx, product_ids)
            .await?;

        tx.commit().await?;

        Ok(attributes)
    }

    async fn list_attributes(&self) -> Result<Vec<ProductAttribute>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let attributes = self.repository.list_attributes(&mut tx).await?;

        tx.commit().await?;

        Ok(attributes)
    }

    async fn get_attribute(
        &self,
        attribute_id: i32,
    ) -> Result<ProductAttribute, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let attribute = self.repository.get_attribute(&mut tx, attribute_id).await?;

        tx.commit().await?;

        Ok(attribute)
    }

    async fn create_attribute(
        &self,
        attribute: NewAttribute,
    ) -> Result<ProductAttribute, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_attribute(&mut tx, attribute).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_attribute(
        &self,
        attribute_id: i32,
        update: AttributeUpdate,
    ) -> Result<ProductAttribute, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_attribute(&mut tx, attribute_id, update)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_attribute(&self, attribute_id: i32) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_attribute(&mut tx, attribute_id)
            .await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Resolve a cart line to the attribute it sells, with current price
    /// and labels. Exact (product, size) match when `size_id` is present;
    /// product-only match otherwise.
    async fn resolve_attribute(
        &self,
        product_id: i32,
        size_id: Option<i32>,
    ) -> Result<PricedAttribute, CatalogServiceError>;

    /// All priced attributes for the given products, in (product, id) order.
    async fn list_priced_attributes(
        &self,
        product_ids: &[i32],
    ) -> Result<Vec<PricedAttribute>, CatalogServiceError>;

    /// Retrieves all attributes.
    async fn list_attributes(&self) -> Result<Vec<ProductAttribute>, CatalogServiceError>;

    /// Retrieve a single attribute.
    async fn get_attribute(
        &self,
        attribute_id: i32,
    ) -> Result<ProductAttribute, CatalogServiceError>;

    /// Creates a new attribute.
    async fn create_attribute(
        &self,
        attribute: NewAttribute,
    ) -> Result<ProductAttribute, CatalogServiceError>;

    /// Updates an attribute.
    async fn update_attribute(
        &self,
        attribute_id: i32,
        update: AttributeUpdate,
    ) -> Result<ProductAttribute, CatalogServiceError>;

    /// Deletes an attribute with the given id.
    async fn delete_attribute(&self, attribute_id: i32) -> Result<(), CatalogServiceError>;
}
