//! Create Affiliate Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::affiliates::{data::NewAffiliate, records::AffiliateUuid};

use crate::{
    affiliates::{errors::into_status_error, get::AffiliateResponse},
    amounts::parse_basis_points,
    extensions::*,
    state::State,
};

/// Create Affiliate Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateAffiliateRequest {
    /// Referral code customers arrive with
    pub code: String,

    pub name: String,

    /// Percent of each referred order total, e.g. `"7.5"`
    #[serde(default)]
    pub commission_rate: Option<String>,
}

/// Create Affiliate Handler
#[endpoint(
    tags("affiliates"),
    summary = "Create Affiliate",
    responses(
        (status_code = StatusCode::CREATED, description = "Affiliate created"),
        (status_code = StatusCode::CONFLICT, description = "Affiliate code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateAffiliateRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AffiliateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let commission_rate = request
        .commission_rate
        .map(|rate| parse_basis_points(&rate, "commission_rate"))
        .transpose()?;

    let affiliate = state
        .app
        .affiliates
        .create_affiliate(NewAffiliate {
            uuid: AffiliateUuid::new(),
            code: request.code,
            name: request.name,
            commission_rate,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/affiliates/{}", affiliate.code), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(affiliate.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::affiliates::{
        AffiliatesServiceError, MockAffiliatesService, records::AffiliateRecord,
    };

    use crate::test_helpers::{affiliates_service, strict_affiliates_mock};

    use super::*;

    fn make_service(affiliates: MockAffiliatesService) -> Service {
        affiliates_service(affiliates, Router::with_path("affiliates").post(handler))
    }

    fn echo(new: NewAffiliate) -> AffiliateRecord {
        AffiliateRecord {
            uuid: new.uuid,
            code: new.code,
            name: new.name,
            commission_rate: new.commission_rate,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_create_affiliate_with_rate() -> TestResult {
        let mut affiliates = MockAffiliatesService::new();

        affiliates
            .expect_create_affiliate()
            .once()
            .withf(|new| {
                new.code == "PARTNER" && new.name == "Partner Blog" && new.commission_rate == Some(750)
            })
            .return_once(|new| Ok(echo(new)));

        affiliates.expect_get_affiliate().never();

        let mut res = TestClient::post("http://example.com/affiliates")
            .json(&json!({ "code": "PARTNER", "name": "Partner Blog", "commission_rate": "7.5" }))
            .send(&make_service(affiliates))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: AffiliateResponse = res.take_json().await?;

        assert_eq!(body.commission_rate.as_deref(), Some("7.50"));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_affiliate_returns_409() -> TestResult {
        let mut affiliates = MockAffiliatesService::new();

        affiliates
            .expect_create_affiliate()
            .once()
            .return_once(|_| Err(AffiliatesServiceError::AlreadyExists));

        affiliates.expect_get_affiliate().never();

        let res = TestClient::post("http://example.com/affiliates")
            .json(&json!({ "code": "PARTNER", "name": "Partner Blog" }))
            .send(&make_service(affiliates))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_negative_rate_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/affiliates")
            .json(&json!({ "code": "PARTNER", "name": "Partner Blog", "commission_rate": "-5" }))
            .send(&make_service(strict_affiliates_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
