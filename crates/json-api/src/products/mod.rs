//! Product endpoints.

pub(crate) mod errors;
pub(crate) mod handlers;

use salvo::prelude::*;

pub(crate) fn router() -> Router {
    Router::with_path("products")
        .get(handlers::index::handler)
        .post(handlers::create::handler)
        .push(
            Router::with_path("{id}")
                .get(handlers::get::handler)
                .put(handlers::update::handler)
                .delete(handlers::delete::handler),
        )
}
