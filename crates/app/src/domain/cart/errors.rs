//! Cart errors.

use thiserror::Error;

use crate::domain::cart::models::{MAX_LINE_QUANTITY, MIN_LINE_QUANTITY};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be between {MIN_LINE_QUANTITY} and {MAX_LINE_QUANTITY}")]
    InvalidQuantity,
}
