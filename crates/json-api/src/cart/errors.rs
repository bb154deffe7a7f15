//! Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::domain::{cart::CartError, checkout::CheckoutError};

pub(crate) fn cart_into_status_error(error: CartError) -> StatusError {
    match error {
        CartError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be between 1 and 100.")
        }
    }
}

pub(crate) fn checkout_into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::EmptyCart => StatusError::bad_request().brief("Cart is empty."),
        CheckoutError::Unauthenticated => {
            StatusError::bad_request().brief("Token is missing or invalid.")
        }
        CheckoutError::UserNotFound => StatusError::bad_request().brief("User not found."),
        CheckoutError::NotFound {
            product_id,
            size_id,
        } => StatusError::bad_request().brief(match size_id {
            Some(size_id) => {
                format!("Product with ID {product_id} and size {size_id} not found.")
            }
            None => format!("Product with ID {product_id} not found."),
        }),
        CheckoutError::Persistence(source) => {
            error!("failed to complete checkout: {source}");

            StatusError::internal_server_error()
        }
    }
}
