//! Coupon Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::coupons::CouponsServiceError;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Coupon code already exists")
        }
        CouponsServiceError::MissingRequiredData | CouponsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid coupon payload")
        }
        CouponsServiceError::NotFound => StatusError::not_found().brief("Coupon not found"),
        CouponsServiceError::Sql(source) => {
            error!("coupons storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
