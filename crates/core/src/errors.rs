//! Pricing errors

use rusty_money::MoneyError;
use thiserror::Error;

/// Malformed calculator input, rejected before any arithmetic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No line items were provided.
    #[error("cart has no line items")]
    EmptyCart,

    /// A line item had a quantity of zero.
    #[error("line item {line} has a quantity of zero")]
    ZeroQuantity {
        /// Zero-based position of the offending line item.
        line: usize,
    },

    /// A line item had a negative unit price.
    #[error("line item {line} has a negative unit price")]
    NegativeUnitPrice {
        /// Zero-based position of the offending line item.
        line: usize,
    },

    /// A line item was priced in a different currency to the store.
    #[error("line item {line} is priced in {found}, expected {expected}")]
    CurrencyMismatch {
        /// Zero-based position of the offending line item.
        line: usize,

        /// Store currency code.
        expected: String,

        /// Line item currency code.
        found: String,
    },

    /// An order total passed for commission was negative.
    #[error("order total cannot be negative")]
    NegativeOrderTotal,

    /// A commission rate fell outside 0-100%.
    #[error("commission rate must be between 0% and 100%")]
    CommissionRateOutOfRange,
}

/// Arithmetic or rule-consistency failures during calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// A percentage product overflowed or could not be represented.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Summing or multiplying minor units overflowed.
    #[error("monetary amount overflowed")]
    Overflow,

    /// Coupon percentage was outside 0-100%.
    #[error("coupon percentage must be between 0% and 100%")]
    CouponPercentageOutOfRange,

    /// Fixed coupon value was negative.
    #[error("coupon amount cannot be negative")]
    NegativeCouponAmount,

    /// Coupon minimum purchase or maximum discount was negative.
    #[error("coupon bounds cannot be negative")]
    NegativeCouponBound,

    /// Coupon amounts were not in the store currency.
    #[error("coupon is not denominated in the store currency")]
    CouponCurrencyMismatch,
}

/// Errors raised by the pricing pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Calculation could not be completed.
    #[error(transparent)]
    Calculation(#[from] CalculationError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}
