//! Coupon Rules
//!
//! A coupon rule is the pricing half of a coupon: how much it takes off and
//! under which subtotal bounds. Whether a coupon may be used at all (active,
//! unexpired, usage remaining) is decided by whoever stores the coupon.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{is_unit_range, percent_of_minor},
    errors::{CalculationError, PricingError},
};

/// The discount a coupon grants.
#[derive(Debug, Clone, Copy)]
pub enum CouponDiscount<'a> {
    /// Percentage of the subtotal (e.g. "10% off").
    PercentageOff(Percentage),

    /// Fixed amount off the subtotal (e.g. "$5 off").
    AmountOff(Money<'a, Currency>),
}

/// A validated-at-use coupon discount rule.
#[derive(Debug, Clone, Copy)]
pub struct CouponRule<'a> {
    discount: CouponDiscount<'a>,
    min_purchase: Option<Money<'a, Currency>>,
    max_discount: Option<Money<'a, Currency>>,
}

impl<'a> CouponRule<'a> {
    /// Create a coupon rule with no bounds.
    pub fn new(discount: CouponDiscount<'a>) -> Self {
        Self {
            discount,
            min_purchase: None,
            max_discount: None,
        }
    }

    /// Percentage-off coupon.
    pub fn percentage(percent: Percentage) -> Self {
        Self::new(CouponDiscount::PercentageOff(percent))
    }

    /// Fixed amount-off coupon.
    pub fn fixed(amount: Money<'a, Currency>) -> Self {
        Self::new(CouponDiscount::AmountOff(amount))
    }

    /// Only apply when the subtotal is at least `amount`.
    #[must_use]
    pub fn with_min_purchase(mut self, amount: Money<'a, Currency>) -> Self {
        self.min_purchase = Some(amount);
        self
    }

    /// Cap the discount of a percentage coupon at `amount`.
    ///
    /// Fixed coupons ignore the cap; their value already is the maximum.
    #[must_use]
    pub fn with_max_discount(mut self, amount: Money<'a, Currency>) -> Self {
        self.max_discount = Some(amount);
        self
    }

    /// Return the discount
    pub fn discount(&self) -> &CouponDiscount<'a> {
        &self.discount
    }

    /// Return the minimum purchase, if any
    pub fn min_purchase(&self) -> Option<&Money<'a, Currency>> {
        self.min_purchase.as_ref()
    }

    /// Return the maximum discount, if any
    pub fn max_discount(&self) -> Option<&Money<'a, Currency>> {
        self.max_discount.as_ref()
    }

    /// Check the rule is internally consistent for the given currency.
    ///
    /// # Errors
    ///
    /// Returns a [`CalculationError`] when the percentage is outside 0-100%, a
    /// fixed amount or bound is negative, or any amount is in another currency.
    pub fn validate(&self, currency: &Currency) -> Result<(), CalculationError> {
        match &self.discount {
            CouponDiscount::PercentageOff(percent) => {
                if !is_unit_range(percent) {
                    return Err(CalculationError::CouponPercentageOutOfRange);
                }
            }
            CouponDiscount::AmountOff(amount) => {
                if amount.currency() != currency {
                    return Err(CalculationError::CouponCurrencyMismatch);
                }

                if amount.to_minor_units() < 0 {
                    return Err(CalculationError::NegativeCouponAmount);
                }
            }
        }

        for bound in [self.min_purchase, self.max_discount].iter().flatten() {
            if bound.currency() != currency {
                return Err(CalculationError::CouponCurrencyMismatch);
            }

            if bound.to_minor_units() < 0 {
                return Err(CalculationError::NegativeCouponBound);
            }
        }

        Ok(())
    }

    /// Whether a subtotal meets the minimum purchase floor.
    pub fn applies_to(&self, subtotal: &Money<'a, Currency>) -> bool {
        self.min_purchase
            .is_none_or(|floor| subtotal.to_minor_units() >= floor.to_minor_units())
    }

    /// Discount this coupon grants on `subtotal`.
    ///
    /// The result is never more than the subtotal and is zero when the
    /// minimum purchase is not met.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the rule is inconsistent or the
    /// percentage product cannot be represented.
    pub fn discount_for(
        &self,
        subtotal: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, PricingError> {
        self.validate(subtotal.currency())?;

        let subtotal_minor = subtotal.to_minor_units();

        if !self.applies_to(subtotal) {
            return Ok(Money::from_minor(0, subtotal.currency()));
        }

        let discount_minor = match &self.discount {
            CouponDiscount::PercentageOff(percent) => {
                let minor = percent_of_minor(percent, subtotal_minor)?;

                self.max_discount
                    .map_or(minor, |cap| minor.min(cap.to_minor_units()))
            }
            CouponDiscount::AmountOff(amount) => amount.to_minor_units(),
        };

        Ok(Money::from_minor(
            discount_minor.clamp(0, subtotal_minor.max(0)),
            subtotal.currency(),
        ))
    }
}
