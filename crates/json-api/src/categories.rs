//! Category endpoints.

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

use vitrine_app::domain::categories::{
    CategoriesServiceError,
    models::{Category, NewCategory},
};

use crate::{extensions::*, state::State};

/// Category on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryResponse {
    pub category_id: i32,
    pub title: String,
    pub size_id: Option<i32>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            category_id: category.category_id,
            title: category.title,
            size_id: category.size_id,
        }
    }
}

/// Create/update payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryRequest {
    pub title: String,
    #[serde(default)]
    pub size_id: Option<i32>,
}

impl From<CategoryRequest> for NewCategory {
    fn from(request: CategoryRequest) -> Self {
        Self {
            title: request.title,
            size_id: request.size_id,
        }
    }
}

fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::NotFound => StatusError::not_found(),
        CategoriesServiceError::InvalidReference | CategoriesServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Invalid category payload")
        }
        CategoriesServiceError::Sql(source) => {
            error!("category storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn router() -> Router {
    Router::with_path("categories")
        .get(index)
        .post(create)
        .push(
            Router::with_path("{id}")
                .get(get)
                .put(update)
                .delete(delete),
        )
}

/// List Categories Handler
#[endpoint(tags("categories"), summary = "List Categories")]
async fn index(depot: &mut Depot) -> Result<Json<Vec<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Get Category Handler
#[endpoint(tags("categories"), summary = "Get Category")]
async fn get(
    id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .get_category(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

/// Create Category Handler
#[endpoint(tags("categories"), summary = "Create Category")]
async fn create(
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .create_category(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}

/// Update Category Handler
#[endpoint(tags("categories"), summary = "Update Category")]
async fn update(
    id: PathParam<i32>,
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .update_category(id.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}

/// Delete Category Handler
#[endpoint(tags("categories"), summary = "Delete Category")]
async fn delete(
    id: PathParam<i32>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .categories
        .delete_category(id.into_inner())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    #[tokio::test]
    async fn test_create_category_returns_201() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_create_category()
            .once()
            .withf(|new| new.title == "Shirts")
            .return_once(|new| {
                Ok(Category {
                    category_id: 1,
                    title: new.title,
                    size_id: new.size_id,
                })
            });

        let res = TestClient::post("http://example.com/categories")
            .json(&json!({ "title": "Shirts" }))
            .send(&mocks.into_service(router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_category_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_get_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let res = TestClient::get("http://example.com/categories/9")
            .send(&mocks.into_service(router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
