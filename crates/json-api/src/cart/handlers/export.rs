//! Order Export Handler

use std::sync::Arc;

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    prelude::*,
};

use vitrine_app::export::order_workbook;

use crate::{extensions::*, state::State};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Order Export Handler
///
/// Streams an order's composition rows as an xlsx workbook.
#[endpoint(
    tags("cart"),
    summary = "Export an order as a spreadsheet",
    responses(
        (status_code = StatusCode::OK, description = "Workbook bytes"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown order or no rows"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order_id = req
        .query::<i32>("orderId")
        .ok_or_else(|| StatusError::bad_request().brief("orderId is required"))?;

    let details = state
        .app
        .orders
        .composition_details(order_id)
        .await
        .map_err(crate::orders::into_status_error)?;

    if details.is_empty() {
        return Err(StatusError::bad_request().brief("No data to export."));
    }

    let workbook = order_workbook(&details).or_500("failed to build order workbook")?;

    res.add_header(CONTENT_TYPE, XLSX_CONTENT_TYPE, true)
        .or_500("failed to set content type")?
        .add_header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"Order_{order_id}.xlsx\""),
            true,
        )
        .or_500("failed to set content disposition")?
        .write_body(workbook)
        .or_500("failed to write workbook body")?;

    Ok(())
}
