//! Size endpoints.

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

use vitrine_app::domain::sizes::{
    SizesServiceError,
    models::{NewSize, Size},
};

use crate::{extensions::*, state::State};

/// Size on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SizeResponse {
    pub size_id: i32,
    pub label: String,
}

impl From<Size> for SizeResponse {
    fn from(size: Size) -> Self {
        Self {
            size_id: size.size_id,
            label: size.label,
        }
    }
}

/// Create/update payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SizeRequest {
    pub label: String,
}

impl From<SizeRequest> for NewSize {
    fn from(request: SizeRequest) -> Self {
        Self {
            label: request.label,
        }
    }
}

fn into_status_error(error: SizesServiceError) -> StatusError {
    match error {
        SizesServiceError::AlreadyExists => StatusError::conflict().brief("Size already exists"),
        SizesServiceError::NotFound => StatusError::not_found(),
        SizesServiceError::InvalidReference => {
            StatusError::bad_request().brief("Size is still referenced")
        }
        SizesServiceError::Sql(source) => {
            error!("size storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn router() -> Router {
    Router::with_path("sizes")
        .get(index)
        .post(create)
        .push(
            Router::with_path("{id}")
                .get(get)
                .put(update)
                .delete(delete),
        )
}

/// List Sizes Handler
#[endpoint(tags("sizes"), summary = "List Sizes")]
async fn index(depot: &mut Depot) -> Result<Json<Vec<SizeResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let sizes = state
        .app
        .sizes
        .list_sizes()
        .await
        .map_err(into_status_error)?;

    Ok(Json(sizes.into_iter().map(SizeResponse::from).collect()))
}

/// Get Size Handler
#[endpoint(tags("sizes"), summary = "Get Size")]
async fn get(id: PathParam<i32>, depot: &mut Depot) -> Result<Json<SizeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let size = state
        .app
        .sizes
        .get_size(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(size.into()))
}

/// Create Size Handler
#[endpoint(tags("sizes"), summary = "Create Size")]
async fn create(
    json: JsonBody<SizeRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SizeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let size = state
        .app
        .sizes
        .create_size(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(size.into()))
}

/// Update Size Handler
#[endpoint(tags("sizes"), summary = "Update Size")]
async fn update(
    id: PathParam<i32>,
    json: JsonBody<SizeRequest>,
    depot: &mut Depot,
) -> Result<Json<SizeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let size = state
        .app
        .sizes
        .update_size(id.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(size.into()))
}

/// Delete Size Handler
#[endpoint(tags("sizes"), summary = "Delete Size")]
async fn delete(
    id: PathParam<i32>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .sizes
        .delete_size(id.into_inner())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
