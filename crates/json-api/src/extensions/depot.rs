//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    /// Injected value of type `T`, or a 500 when the router never injected one.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_missing| {
            error!("depot is missing {}", std::any::type_name::<T>());

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_value_is_internal_error() {
        let depot = Depot::new();

        let error = depot.obtain_or_500::<String>().err().map(|e| e.code);

        assert_eq!(error, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn injected_value_is_returned() {
        let mut depot = Depot::new();
        depot.inject("storefront".to_string());

        assert_eq!(
            depot.obtain_or_500::<String>().ok().map(String::as_str),
            Some("storefront")
        );
    }
}
