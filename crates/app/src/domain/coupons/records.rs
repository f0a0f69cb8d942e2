//! Coupon Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use storefront::{coupons::CouponRule, discounts::from_basis_points};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

/// How a coupon's `value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponKind {
    /// `value` is a percentage in basis points.
    Percentage,

    /// `value` is an amount in minor units.
    Fixed,
}

impl CouponKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown coupon kind: {0}")]
pub struct UnknownCouponKind(pub String);

impl FromStr for CouponKind {
    type Err = UnknownCouponKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            other => Err(UnknownCouponKind(other.to_string())),
        }
    }
}

/// Why a stored coupon cannot be redeemed right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligibility {
    #[error("coupon is not active")]
    Inactive,

    #[error("coupon has expired")]
    Expired,

    #[error("coupon usage limit reached")]
    UsageLimitReached,
}

/// The stored amounts do not fit the pricing types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coupon amounts are out of range")]
pub struct CouponValueOutOfRange;

/// Coupon Record
///
/// Amounts are minor units of the store currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponRecord {
    pub uuid: CouponUuid,
    pub code: String,
    pub kind: CouponKind,
    pub value: u64,
    pub min_purchase: Option<u64>,
    pub max_discount: Option<u64>,
    pub usage_limit: Option<u32>,
    pub used_count: u32,
    pub expires_at: Option<Timestamp>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CouponRecord {
    /// Check the coupon can be redeemed at `now`.
    ///
    /// # Errors
    ///
    /// Returns the first failed gate: inactive, expired, then usage limit.
    pub fn check_eligible(&self, now: Timestamp) -> Result<(), Ineligibility> {
        if !self.is_active {
            return Err(Ineligibility::Inactive);
        }

        if self.expires_at.is_some_and(|expires_at| expires_at <= now) {
            return Err(Ineligibility::Expired);
        }

        if self
            .usage_limit
            .is_some_and(|limit| self.used_count >= limit)
        {
            return Err(Ineligibility::UsageLimitReached);
        }

        Ok(())
    }

    /// Pricing rule for this coupon in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`CouponValueOutOfRange`] when a stored amount does not fit.
    pub fn rule<'a>(&self, currency: &'a Currency) -> Result<CouponRule<'a>, CouponValueOutOfRange> {
        let money = |amount: u64| {
            i64::try_from(amount)
                .map(|minor| Money::from_minor(minor, currency))
                .map_err(|_err| CouponValueOutOfRange)
        };

        let mut rule = match self.kind {
            CouponKind::Percentage => {
                let basis_points = u32::try_from(self.value).map_err(|_err| CouponValueOutOfRange)?;

                CouponRule::percentage(from_basis_points(basis_points))
            }
            CouponKind::Fixed => CouponRule::fixed(money(self.value)?),
        };

        if let Some(min_purchase) = self.min_purchase {
            rule = rule.with_min_purchase(money(min_purchase)?);
        }

        if let Some(max_discount) = self.max_discount {
            rule = rule.with_max_discount(money(max_discount)?);
        }

        Ok(rule)
    }
}
