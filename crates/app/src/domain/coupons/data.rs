//! Coupons Data

use jiff::Timestamp;

use crate::domain::coupons::records::{CouponKind, CouponUuid};

/// New Coupon Data
///
/// Percentage coupons carry `value` in basis points, fixed coupons in minor
/// units.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoupon {
    pub uuid: CouponUuid,
    pub code: String,
    pub kind: CouponKind,
    pub value: u64,
    pub min_purchase: Option<u64>,
    pub max_discount: Option<u64>,
    pub usage_limit: Option<u32>,
    pub expires_at: Option<Timestamp>,
    pub is_active: bool,
}
