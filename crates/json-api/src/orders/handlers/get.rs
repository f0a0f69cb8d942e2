//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    amounts::stored_currency,
    extensions::*,
    orders::{
        errors::into_status_error,
        responses::{CommissionResponse, OrderDetailsResponse, OrderResponse},
    },
    state::State,
};

/// Get Order Handler
///
/// Returns an order with its items and any affiliate commission.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let details = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let currency = stored_currency(&details.order.currency)?;

    Ok(Json(OrderDetailsResponse {
        commission: details
            .commission
            .map(|commission| CommissionResponse::new(commission, currency)),
        order: OrderResponse::new(details.order, details.items, currency),
    }))
}
