//! Authentication

mod errors;
mod models;
mod service;
mod token;

pub use errors::AuthServiceError;
pub use models::*;
pub use service::*;
pub use token::*;
