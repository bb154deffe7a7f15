//! Shopping cart endpoints: cookie-held line items, checkout, and export.

pub(crate) mod cookie;
pub(crate) mod errors;
pub(crate) mod handlers;

use salvo::prelude::*;

pub(crate) fn router() -> Router {
    Router::with_path("cart")
        .get(handlers::get::handler)
        .push(Router::with_path("add").post(handlers::add::handler))
        .push(Router::with_path("update").post(handlers::update::handler))
        .push(Router::with_path("quantity").get(handlers::quantity::handler))
        .push(Router::with_path("remove").post(handlers::remove::handler))
        .push(Router::with_path("checkout").post(handlers::checkout::handler))
        .push(Router::with_path("export").post(handlers::export::handler))
}
