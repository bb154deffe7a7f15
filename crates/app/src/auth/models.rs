//! Auth Models

use crate::auth::token::TokenClaims;

/// Username/password pair presented at registration and login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The authenticated principal a verified credential resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: i32,
    pub username: String,
}

/// A freshly issued bearer token with the claims baked into it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}
