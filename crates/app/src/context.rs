//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, SigningKey},
    database::{self, Db},
    domain::{
        achievements::{AchievementsService, PgAchievementsService},
        catalog::{CatalogService, PgCatalogService},
        categories::{CategoriesService, PgCategoriesService},
        checkout::CheckoutOrchestrator,
        images::{ImagesService, PgImagesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        sizes::{PgSizesService, SizesService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Settings the auth service needs: the token signing key and how long
/// issued tokens live.
#[derive(Debug)]
pub struct AuthSettings {
    pub signing_key: SigningKey,
    pub token_ttl_days: i64,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub sizes: Arc<dyn SizesService>,
    pub categories: Arc<dyn CategoriesService>,
    pub orders: Arc<dyn OrdersService>,
    pub achievements: Arc<dyn AchievementsService>,
    pub images: Arc<dyn ImagesService>,
    pub checkout: CheckoutOrchestrator,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        auth: AuthSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), auth))
    }

    #[must_use]
    pub fn from_db(db: Db, auth: AuthSettings) -> Self {
        let auth_service: Arc<dyn AuthService> = Arc::new(PgAuthService::new(
            db.clone(),
            auth.signing_key,
            auth.token_ttl_days,
        ));

        Self::from_services(
            auth_service,
            Arc::new(PgUsersService::new(db.clone())),
            Arc::new(PgProductsService::new(db.clone())),
            Arc::new(PgCatalogService::new(db.clone())),
            Arc::new(PgSizesService::new(db.clone())),
            Arc::new(PgCategoriesService::new(db.clone())),
            Arc::new(PgOrdersService::new(db.clone())),
            Arc::new(PgAchievementsService::new(db.clone())),
            Arc::new(PgImagesService::new(db)),
        )
    }

    /// Assemble a context from pre-built services. The checkout
    /// orchestrator is wired from the auth, catalog, and orders services.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_services(
        auth: Arc<dyn AuthService>,
        users: Arc<dyn UsersService>,
        products: Arc<dyn ProductsService>,
        catalog: Arc<dyn CatalogService>,
        sizes: Arc<dyn SizesService>,
        categories: Arc<dyn CategoriesService>,
        orders: Arc<dyn OrdersService>,
        achievements: Arc<dyn AchievementsService>,
        images: Arc<dyn ImagesService>,
    ) -> Self {
        let checkout =
            CheckoutOrchestrator::new(auth.clone(), catalog.clone(), orders.clone());

        Self {
            auth,
            users,
            products,
            catalog,
            sizes,
            categories,
            orders,
            achievements,
            images,
            checkout,
        }
    }
}
