//! Create Coupon Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::coupons::{
    data::NewCoupon,
    records::{CouponKind, CouponUuid},
};

use crate::{
    amounts::{parse_basis_points, parse_minor_units},
    coupons::{
        errors::into_status_error,
        get::{CouponKindPayload, CouponResponse},
    },
    extensions::*,
    state::State,
};

const fn active_by_default() -> bool {
    true
}

/// Create Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCouponRequest {
    /// Case-sensitive redemption code
    pub code: String,

    pub kind: CouponKindPayload,

    /// Percent (`"10"`) for percentage coupons, amount (`"5.00"`) for fixed
    pub value: String,

    /// Subtotal the cart must reach before the coupon applies
    #[serde(default)]
    pub min_purchase: Option<String>,

    /// Cap on the discount of a percentage coupon
    #[serde(default)]
    pub max_discount: Option<String>,

    #[serde(default)]
    pub usage_limit: Option<u32>,

    /// RFC 3339 timestamp after which the coupon stops applying
    #[serde(default)]
    pub expires_at: Option<String>,

    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

/// Create Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Create Coupon",
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::CONFLICT, description = "Coupon code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let currency = state.currency;

    let kind = CouponKind::from(request.kind);

    let value = match kind {
        CouponKind::Percentage => u64::from(parse_basis_points(&request.value, "value")?),
        CouponKind::Fixed => parse_minor_units(&request.value, currency, "value")?,
    };

    let min_purchase = request
        .min_purchase
        .map(|amount| parse_minor_units(&amount, currency, "min_purchase"))
        .transpose()?;

    let max_discount = request
        .max_discount
        .map(|amount| parse_minor_units(&amount, currency, "max_discount"))
        .transpose()?;

    let expires_at = request
        .expires_at
        .map(|at| at.parse::<Timestamp>())
        .transpose()
        .or_400("could not parse expires_at")?;

    let coupon = state
        .app
        .coupons
        .create_coupon(NewCoupon {
            uuid: CouponUuid::new(),
            code: request.code,
            kind,
            value,
            min_purchase,
            max_discount,
            usage_limit: request.usage_limit,
            expires_at,
            is_active: request.is_active,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/coupons/{}", coupon.code), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CouponResponse::new(coupon, currency)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::coupons::{
        CouponsServiceError, MockCouponsService, records::CouponRecord,
    };

    use crate::test_helpers::{coupons_service, make_coupon, strict_coupons_mock};

    use super::*;

    fn make_service(coupons: MockCouponsService) -> Service {
        coupons_service(coupons, Router::with_path("coupons").post(handler))
    }

    fn echo(new: NewCoupon) -> CouponRecord {
        CouponRecord {
            uuid: new.uuid,
            min_purchase: new.min_purchase,
            max_discount: new.max_discount,
            usage_limit: new.usage_limit,
            expires_at: new.expires_at,
            is_active: new.is_active,
            ..make_coupon(&new.code, new.kind, new.value)
        }
    }

    #[tokio::test]
    async fn test_create_percentage_coupon() -> TestResult {
        let expires_at: Timestamp = "2026-12-31T23:59:59Z".parse()?;

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_create_coupon()
            .once()
            .withf(move |new| {
                new.code == "SAVE10"
                    && new.kind == CouponKind::Percentage
                    && new.value == 1_000
                    && new.min_purchase == Some(5_000)
                    && new.max_discount == Some(2_500)
                    && new.usage_limit == Some(100)
                    && new.expires_at == Some(expires_at)
                    && new.is_active
            })
            .return_once(|new| Ok(echo(new)));

        coupons.expect_get_coupon().never();

        let mut res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "SAVE10",
                "kind": "percentage",
                "value": "10",
                "min_purchase": "50.00",
                "max_discount": "25.00",
                "usage_limit": 100,
                "expires_at": "2026-12-31T23:59:59Z"
            }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        assert_eq!(location.as_deref(), Some("/coupons/SAVE10"));

        let body: CouponResponse = res.take_json().await?;

        assert_eq!(body.value, "10.00");
        assert_eq!(body.max_discount.as_deref(), Some("25.00"));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_fixed_coupon_uses_minor_units() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_create_coupon()
            .once()
            .withf(|new| new.kind == CouponKind::Fixed && new.value == 500 && !new.is_active)
            .return_once(|new| Ok(echo(new)));

        coupons.expect_get_coupon().never();

        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({ "code": "FIVEOFF", "kind": "fixed", "value": "5.00", "is_active": false }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_code_returns_409() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_create_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::AlreadyExists));

        coupons.expect_get_coupon().never();

        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({ "code": "SAVE10", "kind": "percentage", "value": "10" }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_bad_expiry_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "SAVE10",
                "kind": "percentage",
                "value": "10",
                "expires_at": "next tuesday"
            }))
            .send(&make_service(strict_coupons_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
