//! Affiliate Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::affiliates::AffiliatesServiceError;

pub(crate) fn into_status_error(error: AffiliatesServiceError) -> StatusError {
    match error {
        AffiliatesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Affiliate code already exists")
        }
        AffiliatesServiceError::MissingRequiredData | AffiliatesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid affiliate payload")
        }
        AffiliatesServiceError::NotFound => StatusError::not_found().brief("Affiliate not found"),
        AffiliatesServiceError::Sql(source) => {
            error!("affiliates storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
