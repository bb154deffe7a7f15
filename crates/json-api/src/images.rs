//! Image endpoints. Blobs are stored and served verbatim; listings carry
//! metadata only.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use salvo::{
    http::{
        StatusError,
        header::CONTENT_TYPE,
    },
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use vitrine_app::domain::images::{
    ImagesServiceError,
    models::{ImageMeta, NewImage},
};

use crate::{extensions::*, state::State};

/// Image metadata on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageResponse {
    pub image_id: i32,
    pub product_id: i32,
    pub title: Option<String>,
    pub content_type: String,
    pub byte_len: i64,
}

impl From<ImageMeta> for ImageResponse {
    fn from(meta: ImageMeta) -> Self {
        Self {
            image_id: meta.image_id,
            product_id: meta.product_id,
            title: meta.title,
            content_type: meta.content_type,
            byte_len: meta.byte_len,
        }
    }
}

/// Upload payload; `data` is base64-encoded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadImageRequest {
    pub product_id: i32,
    #[serde(default)]
    pub title: Option<String>,
    pub content_type: String,
    pub data: String,
}

fn into_status_error(error: ImagesServiceError) -> StatusError {
    match error {
        ImagesServiceError::NotFound => StatusError::not_found(),
        ImagesServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown product")
        }
        ImagesServiceError::Sql(source) => {
            error!("image storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn router() -> Router {
    Router::with_path("images")
        .get(index)
        .post(create)
        .push(
            Router::with_path("{id}")
                .delete(delete)
                .push(Router::with_path("data").get(image_data)),
        )
}

/// List Images Handler
#[endpoint(tags("images"), summary = "List image metadata")]
async fn index(depot: &mut Depot) -> Result<Json<Vec<ImageResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let images = state
        .app
        .images
        .list_images()
        .await
        .map_err(into_status_error)?;

    Ok(Json(images.into_iter().map(ImageResponse::from).collect()))
}

/// Image Data Handler
#[endpoint(tags("images"), summary = "Raw image bytes")]
async fn image_data(
    id: PathParam<i32>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let image = state
        .app
        .images
        .get_image_data(id.into_inner())
        .await
        .map_err(into_status_error)?;

    res.add_header(CONTENT_TYPE, image.content_type, true)
        .or_500("failed to set content type")?
        .write_body(image.data)
        .or_500("failed to write image body")?;

    Ok(())
}

/// Upload Image Handler
#[endpoint(tags("images"), summary = "Upload an image")]
async fn create(
    json: JsonBody<UploadImageRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ImageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let data = STANDARD
        .decode(&request.data)
        .or_400("data must be base64-encoded")?;

    let meta = state
        .app
        .images
        .create_image(NewImage {
            product_id: request.product_id,
            title: request.title,
            content_type: request.content_type,
            data,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(meta.into()))
}

/// Delete Image Handler
#[endpoint(tags("images"), summary = "Delete Image")]
async fn delete(
    id: PathParam<i32>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .images
        .delete_image(id.into_inner())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use vitrine_app::domain::images::models::ImageData;

    use crate::test_helpers::Mocks;

    use super::*;

    #[tokio::test]
    async fn test_upload_decodes_base64() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .images
            .expect_create_image()
            .once()
            .withf(|new| new.product_id == 5 && new.data == [0x89, 0x50, 0x4e, 0x47])
            .return_once(|new| {
                Ok(ImageMeta {
                    image_id: 1,
                    product_id: new.product_id,
                    title: new.title,
                    content_type: new.content_type,
                    byte_len: new.data.len() as i64,
                })
            });

        let res = TestClient::post("http://example.com/images")
            .json(&json!({
                "productId": 5,
                "contentType": "image/png",
                "data": "iVBORw=="
            }))
            .send(&mocks.into_service(router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_upload_rejects_invalid_base64() -> TestResult {
        let res = TestClient::post("http://example.com/images")
            .json(&json!({
                "productId": 5,
                "contentType": "image/png",
                "data": "not base64!!!"
            }))
            .send(&Mocks::default().into_service(router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_data_serves_stored_bytes_with_content_type() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .images
            .expect_get_image_data()
            .once()
            .withf(|id| *id == 1)
            .return_once(|_| {
                Ok(ImageData {
                    content_type: "image/png".to_string(),
                    data: vec![0x89, 0x50, 0x4e, 0x47],
                })
            });

        let mut res = TestClient::get("http://example.com/images/1/data")
            .send(&mocks.into_service(router()))
            .await;

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        assert_eq!(content_type.as_deref(), Some("image/png"));
        assert_eq!(res.take_bytes(None).await?, vec![0x89, 0x50, 0x4e, 0x47]);

        Ok(())
    }
}
