//! Checkout errors.

use thiserror::Error;

use crate::{
    auth::AuthServiceError,
    domain::{catalog::CatalogServiceError, orders::OrdersServiceError},
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("credential is missing, invalid, or expired")]
    Unauthenticated,

    #[error("no user record matches the presented credential")]
    UserNotFound,

    #[error("product {product_id} with size {size_id:?} not found")]
    NotFound {
        product_id: i32,
        size_id: Option<i32>,
    },

    #[error("checkout could not be persisted")]
    Persistence(#[source] CheckoutPersistenceError),
}

/// Storage-layer failure behind an aborted checkout, by collaborator.
#[derive(Debug, Error)]
pub enum CheckoutPersistenceError {
    #[error(transparent)]
    Identity(AuthServiceError),

    #[error(transparent)]
    Catalog(CatalogServiceError),

    #[error(transparent)]
    Orders(OrdersServiceError),
}

impl From<AuthServiceError> for CheckoutError {
    fn from(error: AuthServiceError) -> Self {
        match error {
            AuthServiceError::UserNotFound => Self::UserNotFound,
            AuthServiceError::Sql(_) => {
                Self::Persistence(CheckoutPersistenceError::Identity(error))
            }
            _ => Self::Unauthenticated,
        }
    }
}
