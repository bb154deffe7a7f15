//! Registration and login endpoints.

pub(crate) mod handlers;

use salvo::prelude::*;

pub(crate) fn router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("register").post(handlers::register))
        .push(Router::with_path("login").post(handlers::login))
}
