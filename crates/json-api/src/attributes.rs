//! Product attribute endpoints.

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

use vitrine_app::domain::catalog::{
    CatalogServiceError,
    models::{AttributeUpdate, NewAttribute, ProductAttribute},
};

use crate::{extensions::*, state::State};

/// Attribute on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttributeResponse {
    pub attribute_id: i32,
    pub product_id: i32,
    pub size_id: Option<i32>,
    pub count: i32,
    pub color_id: Option<i32>,
}

impl From<ProductAttribute> for AttributeResponse {
    fn from(attribute: ProductAttribute) -> Self {
        Self {
            attribute_id: attribute.attribute_id,
            product_id: attribute.product_id,
            size_id: attribute.size_id,
            count: attribute.count,
            color_id: attribute.color_id,
        }
    }
}

/// Create payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateAttributeRequest {
    pub product_id: i32,
    #[serde(default)]
    pub size_id: Option<i32>,
    #[serde(default)]
    pub count: i32,
    #[serde(default)]
    pub color_id: Option<i32>,
}

impl From<CreateAttributeRequest> for NewAttribute {
    fn from(request: CreateAttributeRequest) -> Self {
        Self {
            product_id: request.product_id,
            size_id: request.size_id,
            count: request.count,
            color_id: request.color_id,
        }
    }
}

/// Update payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateAttributeRequest {
    #[serde(default)]
    pub size_id: Option<i32>,
    pub count: i32,
    #[serde(default)]
    pub color_id: Option<i32>,
}

impl From<UpdateAttributeRequest> for AttributeUpdate {
    fn from(request: UpdateAttributeRequest) -> Self {
        Self {
            size_id: request.size_id,
            count: request.count,
            color_id: request.color_id,
        }
    }
}

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief("An attribute for this product and size already exists")
        }
        CatalogServiceError::NotFound => StatusError::not_found(),
        CatalogServiceError::InvalidReference | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid attribute payload")
        }
        CatalogServiceError::Sql(source) => {
            error!("attribute storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn router() -> Router {
    Router::with_path("attributes")
        .get(index)
        .post(create)
        .push(
            Router::with_path("{id}")
                .get(get)
                .put(update)
                .delete(delete),
        )
}

/// List Attributes Handler
#[endpoint(tags("attributes"), summary = "List Attributes")]
async fn index(depot: &mut Depot) -> Result<Json<Vec<AttributeResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let attributes = state
        .app
        .catalog
        .list_attributes()
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        attributes.into_iter().map(AttributeResponse::from).collect(),
    ))
}

/// Get Attribute Handler
#[endpoint(tags("attributes"), summary = "Get Attribute")]
async fn get(
    id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<Json<AttributeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let attribute = state
        .app
        .catalog
        .get_attribute(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(attribute.into()))
}

/// Create Attribute Handler
#[endpoint(tags("attributes"), summary = "Create Attribute")]
async fn create(
    json: JsonBody<CreateAttributeRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AttributeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let attribute = state
        .app
        .catalog
        .create_attribute(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(attribute.into()))
}

/// Update Attribute Handler
#[endpoint(tags("attributes"), summary = "Update Attribute")]
async fn update(
    id: PathParam<i32>,
    json: JsonBody<UpdateAttributeRequest>,
    depot: &mut Depot,
) -> Result<Json<AttributeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let attribute = state
        .app
        .catalog
        .update_attribute(id.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(attribute.into()))
}

/// Delete Attribute Handler
#[endpoint(tags("attributes"), summary = "Delete Attribute")]
async fn delete(
    id: PathParam<i32>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .catalog
        .delete_attribute(id.into_inner())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
