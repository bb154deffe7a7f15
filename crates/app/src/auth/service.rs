//! Auth service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{Credentials, IssuedToken, UserIdentity},
        token::{SigningKey, TokenClaims, sign_token, verify_token},
    },
    database::Db,
    domain::users::{
        models::{NewUser, User},
        repository::PgUsersRepository,
    },
};

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    users: PgUsersRepository,
    key: SigningKey,
    token_ttl_days: i64,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, key: SigningKey, token_ttl_days: i64) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            key,
            token_ttl_days,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, credentials: Credentials) -> Result<User, AuthServiceError> {
        let password_hash = hash_password(&credentials.password)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .create_user(
                &mut tx,
                NewUser {
                    username: credentials.username,
                    password_hash,
                    email: None,
                    full_name: None,
                    phone_number: None,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let stored = self
            .users
            .get_credentials(&mut tx, &credentials.username)
            .await?;

        tx.commit().await?;

        let Some((user, password_hash)) = stored else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        verify_password(&credentials.password, &password_hash)?;

        let claims = TokenClaims {
            sub: user.username,
            jti: Uuid::now_v7(),
            exp: Timestamp::now().as_second() + self.token_ttl_days * SECONDS_PER_DAY,
        };

        let token = sign_token(&claims, &self.key)
            .map_err(AuthServiceError::Unauthenticated)?;

        Ok(IssuedToken { token, claims })
    }

    async fn resolve_identity(&self, credential: &str) -> Result<UserIdentity, AuthServiceError> {
        let claims = verify_token(credential, &self.key, Timestamp::now())
            .map_err(AuthServiceError::Unauthenticated)?;

        let mut tx = self.db.begin().await?;

        let user = self.users.find_by_username(&mut tx, &claims.sub).await?;

        tx.commit().await?;

        user.map(|user| UserIdentity {
            user_id: user.user_id,
            username: user.username,
        })
        .ok_or(AuthServiceError::UserNotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a user account from the given credentials.
    async fn register(&self, credentials: Credentials) -> Result<User, AuthServiceError>;

    /// Verify a username/password pair and issue a signed bearer token.
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, AuthServiceError>;

    /// Verify a bearer credential and resolve it to a user record.
    async fn resolve_identity(&self, credential: &str) -> Result<UserIdentity, AuthServiceError>;
}

/// Hash a password for storage.
///
/// # Errors
///
/// Returns an error when the hasher rejects its input.
pub fn hash_password(password: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthServiceError::PasswordHash)
}

fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthServiceError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|_| AuthServiceError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthServiceError::InvalidCredentials)
}
