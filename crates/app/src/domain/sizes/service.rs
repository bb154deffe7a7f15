//! Sizes service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::sizes::{
        errors::SizesServiceError,
        models::{NewSize, Size},
        repository::PgSizesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgSizesService {
    db: Db,
    repository: PgSizesRepository,
}

impl PgSizesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSizesRepository::new(),
        }
    }
}

#[async_trait]
impl SizesService for PgSizesService {
    async fn list_sizes(&self) -> Result<Vec<Size>, SizesServiceError> {
        let mut tx = self.db.begin().await?;

        let sizes = self.repository.list_sizes(&mut tx).await?;

        tx.commit().await?;

        Ok(sizes)
    }

    async fn get_size(&self, size_id: i32) -> Result<Size, SizesServiceError> {
        let mut tx = self.db.begin().await?;

        let size = self.repository.get_size(&mut tx, size_id).await?;

        tx.commit().await?;

        Ok(size)
    }

    async fn create_size(&self, size: NewSize) -> Result<Size, SizesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_size(&mut tx, &size.label).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_size(&self, size_id: i32, size: NewSize) -> Result<Size, SizesServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_size(&mut tx, size_id, &size.label)
            .await?
            .ok_or(SizesServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_size(&self, size_id: i32) -> Result<(), SizesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_size(&mut tx, size_id).await?;

        if rows_affected == 0 {
            return Err(SizesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SizesService: Send + Sync {
    /// Retrieves all sizes.
    async fn list_sizes(&self) -> Result<Vec<Size>, SizesServiceError>;

    /// Retrieve a single size.
    async fn get_size(&self, size_id: i32) -> Result<Size, SizesServiceError>;

    /// Creates a new size.
    async fn create_size(&self, size: NewSize) -> Result<Size, SizesServiceError>;

    /// Renames a size.
    async fn update_size(&self, size_id: i32, size: NewSize) -> Result<Size, SizesServiceError>;

    /// Deletes a size with the given id.
    async fn delete_size(&self, size_id: i32) -> Result<(), SizesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_update_delete_round_trip() -> TestResult {
        let ctx = TestContext::new().await;

        let size = ctx
            .sizes
            .create_size(NewSize {
                label: "M".to_string(),
            })
            .await?;

        let renamed = ctx
            .sizes
            .update_size(
                size.size_id,
                NewSize {
                    label: "Medium".to_string(),
                },
            )
            .await?;

        assert_eq!(renamed.label, "Medium");

        ctx.sizes.delete_size(size.size_id).await?;

        let result = ctx.sizes.get_size(size.size_id).await;

        assert!(
            matches!(result, Err(SizesServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_label_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.sizes
            .create_size(NewSize {
                label: "M".to_string(),
            })
            .await?;

        let result = ctx
            .sizes
            .create_size(NewSize {
                label: "M".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(SizesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
