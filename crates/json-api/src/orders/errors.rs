//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::observability::OrderOutcome;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Sql(source) => {
            error!("orders storage error: {source}");

            StatusError::internal_server_error()
        }
        error => {
            error!("failed to load order: {error}");

            StatusError::internal_server_error()
        }
    }
}

/// Message for a rejected order. Every failure is reported to the caller as a
/// bad request; storage details stay in the logs.
pub(crate) fn failure_message(error: &OrdersServiceError) -> String {
    match error {
        OrdersServiceError::Sql(_) => "order could not be placed".to_string(),
        OrdersServiceError::AlreadyExists => "order already exists".to_string(),
        OrdersServiceError::MissingRequiredData => {
            "a valid guest email and a complete shipping address are required".to_string()
        }
        error => error.to_string(),
    }
}

/// Storage failures count as failed orders, everything else as rejected.
pub(crate) fn failure_outcome(error: &OrdersServiceError) -> OrderOutcome {
    match error {
        OrdersServiceError::Sql(_) => OrderOutcome::Failed,
        _ => OrderOutcome::Rejected,
    }
}
