//! Get Coupon Handler

use std::{string::ToString, sync::Arc};

use rusty_money::iso::Currency;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::coupons::records::{CouponKind, CouponRecord};

use crate::{
    amounts::{format_basis_points, format_minor_units},
    coupons::errors::into_status_error,
    extensions::*,
    state::State,
};

/// Coupon discount type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum CouponKindPayload {
    /// `value` is a percent of the subtotal
    Percentage,

    /// `value` is an amount in the store currency
    Fixed,
}

impl From<CouponKindPayload> for CouponKind {
    fn from(kind: CouponKindPayload) -> Self {
        match kind {
            CouponKindPayload::Percentage => Self::Percentage,
            CouponKindPayload::Fixed => Self::Fixed,
        }
    }
}

impl From<CouponKind> for CouponKindPayload {
    fn from(kind: CouponKind) -> Self {
        match kind {
            CouponKind::Percentage => Self::Percentage,
            CouponKind::Fixed => Self::Fixed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    pub uuid: Uuid,
    pub code: String,
    pub kind: CouponKindPayload,

    /// Percent for percentage coupons, amount for fixed coupons
    pub value: String,

    pub min_purchase: Option<String>,
    pub max_discount: Option<String>,
    pub usage_limit: Option<u32>,
    pub used_count: u32,
    pub expires_at: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl CouponResponse {
    pub(crate) fn new(coupon: CouponRecord, currency: &Currency) -> Self {
        let value = match coupon.kind {
            CouponKind::Percentage => u32::try_from(coupon.value)
                .map_or_else(|_err| coupon.value.to_string(), format_basis_points),
            CouponKind::Fixed => format_minor_units(coupon.value, currency),
        };

        Self {
            uuid: coupon.uuid.into(),
            code: coupon.code,
            kind: coupon.kind.into(),
            value,
            min_purchase: coupon
                .min_purchase
                .map(|amount| format_minor_units(amount, currency)),
            max_discount: coupon
                .max_discount
                .map(|amount| format_minor_units(amount, currency)),
            usage_limit: coupon.usage_limit,
            used_count: coupon.used_count,
            expires_at: coupon.expires_at.as_ref().map(ToString::to_string),
            is_active: coupon.is_active,
            created_at: coupon.created_at.to_string(),
        }
    }
}

/// Get Coupon Handler
///
/// Looks a coupon up by its case-sensitive code.
#[endpoint(
    tags("coupons"),
    summary = "Get Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Coupon found"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupon = state
        .app
        .coupons
        .get_coupon(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponResponse::new(coupon, state.currency)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::coupons::{CouponsServiceError, MockCouponsService};

    use crate::test_helpers::{coupons_service, make_coupon};

    use super::*;

    fn make_service(coupons: MockCouponsService) -> Service {
        coupons_service(coupons, Router::with_path("coupons/{code}").get(handler))
    }

    #[tokio::test]
    async fn test_get_percentage_coupon() -> TestResult {
        let mut coupons = MockCouponsService::new();

        let coupon = CouponRecord {
            max_discount: Some(5_000),
            usage_limit: Some(100),
            used_count: 3,
            ..make_coupon("SAVE10", CouponKind::Percentage, 1_000)
        };

        coupons
            .expect_get_coupon()
            .once()
            .withf(|code| code == "SAVE10")
            .return_once(move |_| Ok(coupon));

        coupons.expect_create_coupon().never();

        let mut res = TestClient::get("http://example.com/coupons/SAVE10")
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CouponResponse = res.take_json().await?;

        assert_eq!(body.kind, CouponKindPayload::Percentage);
        assert_eq!(body.value, "10.00");
        assert_eq!(body.max_discount.as_deref(), Some("50.00"));
        assert_eq!(body.min_purchase, None);
        assert_eq!((body.usage_limit, body.used_count), (Some(100), 3));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_fixed_coupon_value_is_amount() -> TestResult {
        let mut coupons = MockCouponsService::new();

        let coupon = make_coupon("FIVEOFF", CouponKind::Fixed, 500);

        coupons
            .expect_get_coupon()
            .once()
            .return_once(move |_| Ok(coupon));

        coupons.expect_create_coupon().never();

        let mut res = TestClient::get("http://example.com/coupons/FIVEOFF")
            .send(&make_service(coupons))
            .await;

        let body: CouponResponse = res.take_json().await?;

        assert_eq!(body.kind, CouponKindPayload::Fixed);
        assert_eq!(body.value, "5.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_coupon_returns_404() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_get_coupon()
            .once()
            .withf(|code| code == "save10")
            .return_once(|_| Err(CouponsServiceError::NotFound));

        coupons.expect_create_coupon().never();

        let res = TestClient::get("http://example.com/coupons/save10")
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
