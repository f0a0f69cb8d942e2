//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use storefront::errors::PricingError;
use thiserror::Error;

use crate::domain::{coupons::records::Ineligibility, products::records::ProductUuid};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("coupon {0} not found")]
    CouponNotFound(String),

    #[error("coupon {code} cannot be used: {reason}")]
    CouponIneligible { code: String, reason: Ineligibility },

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => match error {
                Error::ColumnDecode { .. } => Self::InvalidData,
                error => Self::Sql(error),
            },
        }
    }
}
