//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::observability::{CartOutcome, record_cart_calculation};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    let status = match &error {
        OrdersServiceError::ProductNotFound(_) => StatusError::not_found().brief(error.to_string()),
        OrdersServiceError::CouponNotFound(_)
        | OrdersServiceError::CouponIneligible { .. }
        | OrdersServiceError::Pricing(_) => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart"),
        OrdersServiceError::NotFound | OrdersServiceError::AlreadyExists => {
            error!("unexpected cart calculation error: {error}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("cart calculation storage error: {source}");

            StatusError::internal_server_error()
        }
    };

    record_cart_calculation(if status.code.is_server_error() {
        CartOutcome::Failed
    } else {
        CartOutcome::Rejected
    });

    status
}
