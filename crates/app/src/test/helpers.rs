//! Test Helpers

use crate::{
    domain::{
        affiliates::{
            AffiliatesService, AffiliatesServiceError,
            data::NewAffiliate,
            records::{AffiliateRecord, AffiliateUuid},
        },
        coupons::{
            CouponsService, CouponsServiceError,
            data::NewCoupon,
            records::{CouponKind, CouponRecord, CouponUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            price,
        })
        .await
}

/// Active, unlimited percentage coupon; `basis_points` of 1000 is 10% off.
pub(crate) async fn percentage_coupon(
    ctx: &TestContext,
    code: &str,
    basis_points: u64,
) -> Result<CouponRecord, CouponsServiceError> {
    ctx.coupons
        .create_coupon(NewCoupon {
            uuid: CouponUuid::new(),
            code: code.to_string(),
            kind: CouponKind::Percentage,
            value: basis_points,
            min_purchase: None,
            max_discount: None,
            usage_limit: None,
            expires_at: None,
            is_active: true,
        })
        .await
}

pub(crate) async fn create_affiliate(
    ctx: &TestContext,
    code: &str,
    commission_rate: Option<u32>,
) -> Result<AffiliateRecord, AffiliatesServiceError> {
    ctx.affiliates
        .create_affiliate(NewAffiliate {
            uuid: AffiliateUuid::new(),
            code: code.to_string(),
            name: format!("Affiliate {code}"),
            commission_rate,
        })
        .await
}
