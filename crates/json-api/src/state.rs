//! State

use std::sync::Arc;

use vitrine_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Days the `Cart` cookie stays alive.
    pub(crate) cart_ttl_days: i64,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, cart_ttl_days: i64) -> Self {
        Self { app, cart_ttl_days }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, cart_ttl_days: i64) -> Arc<Self> {
        Arc::new(Self::new(app, cart_ttl_days))
    }
}
