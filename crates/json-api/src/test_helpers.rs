//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use vitrine_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        achievements::MockAchievementsService, catalog::MockCatalogService,
        categories::MockCategoriesService, images::MockImagesService, orders::MockOrdersService,
        products::MockProductsService, sizes::MockSizesService, users::MockUsersService,
    },
};

use crate::state::State;

/// Cart cookie TTL used by handler tests.
pub(crate) const TEST_CART_TTL_DAYS: i64 = 3;

/// One mock per service. Tests set expectations on the services they
/// exercise; untouched mocks panic on any call, which keeps handler tests
/// honest about what they reach.
#[derive(Default)]
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub users: MockUsersService,
    pub products: MockProductsService,
    pub catalog: MockCatalogService,
    pub sizes: MockSizesService,
    pub categories: MockCategoriesService,
    pub orders: MockOrdersService,
    pub achievements: MockAchievementsService,
    pub images: MockImagesService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext::from_services(
            Arc::new(self.auth),
            Arc::new(self.users),
            Arc::new(self.products),
            Arc::new(self.catalog),
            Arc::new(self.sizes),
            Arc::new(self.categories),
            Arc::new(self.orders),
            Arc::new(self.achievements),
            Arc::new(self.images),
        );

        Arc::new(State::new(app, TEST_CART_TTL_DAYS))
    }

    /// Wrap a route with this mock state, ready for `TestClient`.
    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}
