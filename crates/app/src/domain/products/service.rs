//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, Product, ProductUpdate},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product_id: i32) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product_id).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_products_by_ids(
        &self,
        product_ids: &[i32],
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products_by_ids(&mut tx, product_ids)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product_id: i32,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product_id, update)
            .await?;

        if let Some(product) = updated {
            tx.commit().await?;

            return Ok(product);
        }

        // No row matched (id, row_version): distinguish a stale version
        // from a missing product so the client knows whether to re-fetch.
        let exists = self.repository.product_exists(&mut tx, product_id).await?;

        if exists {
            Err(ProductsServiceError::Conflict)
        } else {
            Err(ProductsServiceError::NotFound)
        }
    }

    async fn delete_product(&self, product_id: i32) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product_id).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product_id: i32) -> Result<Product, ProductsServiceError>;

    /// Retrieve the products matching the given ids, in id order.
    async fn list_products_by_ids(
        &self,
        product_ids: &[i32],
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Updates a product, checking the caller's `row_version` against the
    /// stored one.
    async fn update_product(
        &self,
        product_id: i32,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product with the given id.
    async fn delete_product(&self, product_id: i32) -> Result<(), ProductsServiceError>;
}
