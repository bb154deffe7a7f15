//! Register and Login Handlers

use std::sync::Arc;

use salvo::{
    http::StatusError,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use vitrine_app::auth::{AuthServiceError, Credentials};

use crate::{extensions::*, state::State};

/// Username/password pair.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl From<CredentialsRequest> for Credentials {
    fn from(request: CredentialsRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
        }
    }
}

/// Registered user summary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterResponse {
    pub user_id: i32,
    pub username: String,
}

/// Issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    pub token: String,
}

fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("User already exists.")
        }
        AuthServiceError::InvalidCredentials
        | AuthServiceError::Unauthenticated(_)
        | AuthServiceError::UserNotFound => {
            StatusError::unauthorized().brief("Invalid username or password.")
        }
        AuthServiceError::PasswordHash => {
            error!("password hashing failed");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Register Handler
#[endpoint(
    tags("auth"),
    summary = "Register a new user",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::CONFLICT, description = "Username taken"),
    ),
)]
pub(crate) async fn register(
    json: JsonBody<CredentialsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegisterResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(RegisterResponse {
        user_id: user.user_id,
        username: user.username,
    }))
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Login and receive a bearer token",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
    ),
)]
pub(crate) async fn login(
    json: JsonBody<CredentialsRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        token: issued.token,
    }))
}
