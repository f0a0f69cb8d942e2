//! Create Order With Calculations Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use tracing::{error, warn};

use storefront_app::domain::orders::{OrdersServiceError, data::NewOrder};

use crate::{
    cart::responses::CalculationResponse,
    extensions::*,
    observability::{OrderOutcome, record_order},
    orders::{
        errors::{failure_message, failure_outcome},
        requests::CreateOrderRequest,
        responses::{CommissionResponse, CreateOrderResponse, OrderResponse},
    },
    state::State,
};

/// Create Order With Calculations Handler
///
/// Prices the cart and places the order in one step. Failures answer with
/// `{success: false, message}`.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Order rejected"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CreateOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = match NewOrder::try_from(json.into_inner()) {
        Ok(order) => order,
        Err(message) => {
            record_order(OrderOutcome::Rejected);
            res.status_code(StatusCode::BAD_REQUEST);

            return Ok(Json(CreateOrderResponse::failure(message)));
        }
    };

    let created = match state.app.orders.create_order_with_calculations(order).await {
        Ok(created) => created,
        Err(error) => {
            if let OrdersServiceError::Sql(source) = &error {
                error!("order creation storage error: {source}");
            } else {
                warn!("order rejected: {error}");
            }

            record_order(failure_outcome(&error));
            res.status_code(StatusCode::BAD_REQUEST);

            return Ok(Json(CreateOrderResponse::failure(failure_message(&error))));
        }
    };

    let currency = state.currency;

    res.add_header(LOCATION, format!("/orders/{}", created.order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    record_order(OrderOutcome::Created);

    let calculation = CalculationResponse::from(&created.calculation);
    let commission = created
        .commission
        .map(|commission| CommissionResponse::new(commission, currency));

    Ok(Json(CreateOrderResponse {
        success: true,
        message: None,
        order: Some(OrderResponse::new(created.order, created.items, currency)),
        calculation: Some(calculation),
        commission,
    }))
}
