//! Achievement endpoints, plus the per-user grant handlers mounted under
//! `/users/{id}/achievements`.

use std::sync::Arc;

use salvo::{
    http::StatusError,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use vitrine_app::domain::achievements::{
    AchievementsServiceError,
    models::{Achievement, NewAchievement},
};

use crate::{extensions::*, state::State};

/// Achievement on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AchievementResponse {
    pub achievement_id: i32,
    pub title: String,
    pub description: Option<String>,
}

impl From<Achievement> for AchievementResponse {
    fn from(achievement: Achievement) -> Self {
        Self {
            achievement_id: achievement.achievement_id,
            title: achievement.title,
            description: achievement.description,
        }
    }
}

/// Create payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AchievementRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Grant payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GrantRequest {
    pub achievement_id: i32,
}

fn into_status_error(error: AchievementsServiceError) -> StatusError {
    match error {
        AchievementsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Achievement already granted")
        }
        AchievementsServiceError::NotFound => StatusError::not_found(),
        AchievementsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown user or achievement")
        }
        AchievementsServiceError::Sql(source) => {
            error!("achievement storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn router() -> Router {
    Router::with_path("achievements")
        .get(index)
        .post(create)
        .push(Router::with_path("{id}").get(get).delete(delete))
}

/// List Achievements Handler
#[endpoint(tags("achievements"), summary = "List Achievements")]
async fn index(depot: &mut Depot) -> Result<Json<Vec<AchievementResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let achievements = state
        .app
        .achievements
        .list_achievements()
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        achievements
            .into_iter()
            .map(AchievementResponse::from)
            .collect(),
    ))
}

/// Get Achievement Handler
#[endpoint(tags("achievements"), summary = "Get Achievement")]
async fn get(
    id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<Json<AchievementResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let achievement = state
        .app
        .achievements
        .get_achievement(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(achievement.into()))
}

/// Create Achievement Handler
#[endpoint(tags("achievements"), summary = "Create Achievement")]
async fn create(
    json: JsonBody<AchievementRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AchievementResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let achievement = state
        .app
        .achievements
        .create_achievement(NewAchievement {
            title: request.title,
            description: request.description,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(achievement.into()))
}

/// Delete Achievement Handler
#[endpoint(tags("achievements"), summary = "Delete Achievement")]
async fn delete(
    id: PathParam<i32>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .achievements
        .delete_achievement(id.into_inner())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

/// User Achievements Handler
#[endpoint(tags("achievements"), summary = "List a user's achievements")]
pub(crate) async fn list_for_user(
    id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<Json<Vec<AchievementResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let achievements = state
        .app
        .achievements
        .achievements_for_user(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        achievements
            .into_iter()
            .map(AchievementResponse::from)
            .collect(),
    ))
}

/// Grant Achievement Handler
#[endpoint(tags("achievements"), summary = "Grant an achievement to a user")]
pub(crate) async fn grant(
    id: PathParam<i32>,
    json: JsonBody<GrantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .achievements
        .grant_achievement(id.into_inner(), json.into_inner().achievement_id)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(())
}
