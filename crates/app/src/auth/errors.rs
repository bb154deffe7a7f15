//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::auth::token::TokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("credential is missing, malformed, or expired")]
    Unauthenticated(#[source] TokenError),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("user already exists")]
    AlreadyExists,

    #[error("no user record matches the token subject")]
    UserNotFound,

    #[error("password hashing failed")]
    PasswordHash,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            _ => Self::Sql(error),
        }
    }
}
