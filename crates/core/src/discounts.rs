//! Percentage arithmetic
//!
//! Shared helpers for applying a [`Percentage`] to a minor-unit amount. Coupon
//! discounts, tax and affiliate commission all go through [`percent_of_minor`]
//! so every percentage product is rounded exactly once.

use std::str::FromStr;

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::errors::CalculationError;

/// Return the underlying fraction of a percentage (`0.25` for 25%).
pub fn fraction(percent: &Percentage) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal
    (*percent) * Decimal::ONE
}

/// Check that a percentage lies in the closed range 0-100%.
pub fn is_unit_range(percent: &Percentage) -> bool {
    let value = fraction(percent);

    value >= Decimal::ZERO && value <= Decimal::ONE
}

/// Build a percentage from basis points (`1_000` is 10%).
pub fn from_basis_points(basis_points: u32) -> Percentage {
    Percentage::from(f64::from(basis_points) / 10_000.0)
}

/// Express a percentage in whole basis points, rounded half away from zero.
pub fn to_basis_points(percent: &Percentage) -> Option<u32> {
    fraction(percent)
        .checked_mul(Decimal::from(10_000))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}

/// Parse a percent such as `"12.5"` into basis points (`1_250`).
///
/// Returns `None` for negative values, values finer than one basis point and
/// anything that is not a decimal number.
pub fn parse_percent_basis_points(percent: &str) -> Option<u32> {
    let basis_points = Decimal::from_str(percent.trim())
        .ok()?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .normalize();

    if basis_points.scale() > 0 {
        return None;
    }

    basis_points.to_u32()
}

/// Calculate a percentage of a minor unit amount, rounded half away from zero.
///
/// # Errors
///
/// Returns [`CalculationError::PercentConversion`] if the product overflows or
/// cannot be represented as an `i64`.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, CalculationError> {
    let minor = Decimal::from_i64(minor).ok_or(CalculationError::PercentConversion)?;

    fraction(percent)
        .checked_mul(minor)
        .ok_or(CalculationError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(CalculationError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(CalculationError::PercentConversion)));
    }

    #[test]
    fn percent_of_minor_checked_mul_overflow_returns_error() -> TestResult {
        let percent = Percentage::try_from("100000000000000000000")?;
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(CalculationError::PercentConversion)));

        Ok(())
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        // 8% of 170_730 = 13_658.4
        assert_eq!(percent_of_minor(&Percentage::from(0.08), 170_730)?, 13_658);

        // 10% of 5 = 0.5
        assert_eq!(percent_of_minor(&Percentage::from(0.1), 5)?, 1);

        Ok(())
    }

    #[test]
    fn basis_points_convert_both_ways() {
        assert_eq!(to_basis_points(&from_basis_points(1_000)), Some(1_000));
        assert_eq!(to_basis_points(&from_basis_points(825)), Some(825));
        assert_eq!(to_basis_points(&Percentage::from(-0.5)), None);
    }

    #[test]
    fn percent_strings_parse_to_basis_points() {
        assert_eq!(parse_percent_basis_points("10"), Some(1_000));
        assert_eq!(parse_percent_basis_points("12.5"), Some(1_250));
        assert_eq!(parse_percent_basis_points(" 0.01 "), Some(1));
        assert_eq!(parse_percent_basis_points("0.005"), None);
        assert_eq!(parse_percent_basis_points("-5"), None);
        assert_eq!(parse_percent_basis_points("ten"), None);
    }

    #[test]
    fn unit_range_accepts_bounds_and_rejects_outside() {
        assert!(is_unit_range(&Percentage::from(0.0)));
        assert!(is_unit_range(&Percentage::from(1.0)));
        assert!(!is_unit_range(&Percentage::from(1.01)));
        assert!(!is_unit_range(&Percentage::from(-0.01)));
    }
}
