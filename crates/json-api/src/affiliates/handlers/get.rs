//! Get Affiliate Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::affiliates::records::AffiliateRecord;

use crate::{
    affiliates::errors::into_status_error, amounts::format_basis_points, extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AffiliateResponse {
    pub uuid: Uuid,
    pub code: String,
    pub name: String,

    /// Percent of each referred order total; the store default applies when absent
    pub commission_rate: Option<String>,

    pub created_at: String,
}

impl From<AffiliateRecord> for AffiliateResponse {
    fn from(affiliate: AffiliateRecord) -> Self {
        Self {
            uuid: affiliate.uuid.into(),
            code: affiliate.code,
            name: affiliate.name,
            commission_rate: affiliate.commission_rate.map(format_basis_points),
            created_at: affiliate.created_at.to_string(),
        }
    }
}

/// Get Affiliate Handler
#[endpoint(
    tags("affiliates"),
    summary = "Get Affiliate",
    responses(
        (status_code = StatusCode::OK, description = "Affiliate found"),
        (status_code = StatusCode::NOT_FOUND, description = "Affiliate not found"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<AffiliateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let affiliate = state
        .app
        .affiliates
        .get_affiliate(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(affiliate.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::affiliates::{AffiliatesServiceError, MockAffiliatesService};

    use crate::test_helpers::{affiliates_service, make_affiliate};

    use super::*;

    fn make_service(affiliates: MockAffiliatesService) -> Service {
        affiliates_service(affiliates, Router::with_path("affiliates/{code}").get(handler))
    }

    #[tokio::test]
    async fn test_get_affiliate_with_default_rate() -> TestResult {
        let mut affiliates = MockAffiliatesService::new();

        let affiliate = make_affiliate("PARTNER", None);

        affiliates
            .expect_get_affiliate()
            .once()
            .withf(|code| code == "PARTNER")
            .return_once(move |_| Ok(affiliate));

        affiliates.expect_create_affiliate().never();

        let mut res = TestClient::get("http://example.com/affiliates/PARTNER")
            .send(&make_service(affiliates))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: AffiliateResponse = res.take_json().await?;

        assert_eq!(body.code, "PARTNER");
        assert_eq!(body.commission_rate, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_affiliate_returns_404() -> TestResult {
        let mut affiliates = MockAffiliatesService::new();

        affiliates
            .expect_get_affiliate()
            .once()
            .return_once(|_| Err(AffiliatesServiceError::NotFound));

        affiliates.expect_create_affiliate().never();

        let res = TestClient::get("http://example.com/affiliates/NOBODY")
            .send(&make_service(affiliates))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
