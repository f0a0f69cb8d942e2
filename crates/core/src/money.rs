//! Money conversions
//!
//! Monetary values cross every boundary as decimal strings (`"1843.88"`), never
//! as floats.

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors parsing a decimal amount into money.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The string was not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),

    /// The amount had more decimal places than the currency allows.
    #[error("amount {amount} has more than {exponent} decimal places")]
    TooPrecise {
        /// Offending amount.
        amount: String,

        /// Currency exponent.
        exponent: u32,
    },

    /// The amount does not fit in minor units.
    #[error("amount {0} is out of range")]
    OutOfRange(String),
}

/// Decimal amount in major units (`12.50` for 1250 cents).
pub fn to_decimal(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

/// Decimal string in major units, always with the currency's decimal places.
pub fn to_decimal_string(money: &Money<'_, Currency>) -> String {
    to_decimal(money).to_string()
}

/// Decimal string for a non-negative minor-unit amount stored outside
/// [`Money`], e.g. a database column.
pub fn format_minor_units(minor: u64, currency: &Currency) -> String {
    Decimal::from_i128_with_scale(i128::from(minor), currency.exponent).to_string()
}

/// Convert a major-unit decimal into money.
///
/// # Errors
///
/// Returns an [`AmountError`] when the amount has sub-minor-unit precision or
/// does not fit in `i64` minor units.
pub fn from_decimal(amount: Decimal, currency: &Currency) -> Result<Money<'_, Currency>, AmountError> {
    let normalized = amount.normalize();

    if normalized.scale() > currency.exponent {
        return Err(AmountError::TooPrecise {
            amount: amount.to_string(),
            exponent: currency.exponent,
        });
    }

    let minor = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|factor| normalized.checked_mul(Decimal::from(factor)))
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| AmountError::OutOfRange(amount.to_string()))?;

    Ok(Money::from_minor(minor, currency))
}

/// Parse a major-unit decimal string into money.
///
/// # Errors
///
/// Returns an [`AmountError`] when the string is not a decimal or cannot be
/// represented exactly in minor units.
pub fn parse_amount<'a>(amount: &str, currency: &'a Currency) -> Result<Money<'a, Currency>, AmountError> {
    let decimal =
        Decimal::from_str(amount.trim()).map_err(|_err| AmountError::Invalid(amount.to_string()))?;

    from_decimal(decimal, currency)
}
