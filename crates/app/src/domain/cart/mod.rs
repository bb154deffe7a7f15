//! Shopping cart: line items, quantity bounds, and the session-scoped store.

pub mod errors;
pub mod models;
pub mod store;

pub use errors::CartError;
pub use models::{Cart, CartLineItem, MAX_LINE_QUANTITY, MIN_LINE_QUANTITY};
pub use store::{CartStore, MemoryCartStore};
