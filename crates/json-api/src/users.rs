//! User endpoints, including each user's achievements.

use std::sync::Arc;

use salvo::{
    http::StatusError,
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use vitrine_app::domain::users::{UsersServiceError, models::User};

use crate::{achievements, extensions::*, state::State};

/// User on the wire. Password hashes never leave the persistence layer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    pub user_id: i32,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub registration_date: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            phone_number: user.phone_number,
            registration_date: user.registration_date.to_string(),
        }
    }
}

fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found(),
        UsersServiceError::AlreadyExists
        | UsersServiceError::InvalidReference
        | UsersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Sql(source) => {
            error!("user storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn router() -> Router {
    Router::with_path("users").get(index).push(
        Router::with_path("{id}")
            .get(get)
            .delete(delete)
            .push(
                Router::with_path("achievements")
                    .get(achievements::list_for_user)
                    .post(achievements::grant),
            ),
    )
}

/// List Users Handler
#[endpoint(tags("users"), summary = "List Users")]
async fn index(depot: &mut Depot) -> Result<Json<Vec<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_status_error)?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get User Handler
#[endpoint(tags("users"), summary = "Get User")]
async fn get(id: PathParam<i32>, depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .get_user(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

/// Delete User Handler
#[endpoint(tags("users"), summary = "Delete User")]
async fn delete(
    id: PathParam<i32>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .users
        .delete_user(id.into_inner())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
