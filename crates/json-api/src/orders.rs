//! Order endpoints. Orders are immutable: they are created by checkout
//! and can only be read or deleted here.

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    http::StatusError,
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use vitrine_app::domain::orders::{
    OrdersServiceError,
    models::{Order, OrderComposition},
};

use crate::{extensions::*, state::State};

/// Order header on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub order_id: i32,
    pub user_id: i32,
    pub created_at: String,
    pub order_type: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id,
            user_id: order.user_id,
            created_at: order.created_at.to_string(),
            order_type: order.order_type,
        }
    }
}

/// One composition row on the wire.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompositionResponse {
    pub order_id: i32,
    pub attribute_id: i32,
    pub quantity: i32,
    pub unit_cost: Decimal,
}

impl From<OrderComposition> for CompositionResponse {
    fn from(composition: OrderComposition) -> Self {
        Self {
            order_id: composition.order_id,
            attribute_id: composition.attribute_id,
            quantity: composition.quantity,
            unit_cost: composition.unit_cost,
        }
    }
}

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found(),
        OrdersServiceError::AlreadyExists
        | OrdersServiceError::InvalidReference
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn router() -> Router {
    Router::with_path("orders").get(index).push(
        Router::with_path("{id}")
            .get(get)
            .delete(delete)
            .push(Router::with_path("compositions").get(compositions)),
    )
}

/// List Orders Handler
#[endpoint(tags("orders"), summary = "List Orders")]
async fn index(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// Get Order Handler
#[endpoint(tags("orders"), summary = "Get Order")]
async fn get(id: PathParam<i32>, depot: &mut Depot) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

/// Order Compositions Handler
#[endpoint(tags("orders"), summary = "List an order's composition rows")]
async fn compositions(
    id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<Json<Vec<CompositionResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let rows = state
        .app
        .orders
        .list_compositions(id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        rows
            .into_iter()
            .map(CompositionResponse::from)
            .collect(),
    ))
}

/// Delete Order Handler
#[endpoint(tags("orders"), summary = "Delete Order")]
async fn delete(
    id: PathParam<i32>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .orders
        .delete_order(id.into_inner())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
