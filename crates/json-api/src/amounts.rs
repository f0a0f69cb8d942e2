//! Decimal string amounts on the wire.

use rusty_money::{Findable, iso::Currency};
use salvo::prelude::StatusError;
use storefront::{discounts::parse_percent_basis_points, money::parse_amount};

use crate::extensions::*;

pub(crate) use storefront::money::{format_minor_units, to_decimal_string};

/// Parse a non-negative major-unit amount such as `"1299.99"` into minor units.
pub(crate) fn parse_minor_units(
    amount: &str,
    currency: &Currency,
    field: &str,
) -> Result<u64, StatusError> {
    let money = parse_amount(amount, currency).or_400(&format!("invalid {field}"))?;

    u64::try_from(money.to_minor_units()).or_400(&format!("{field} cannot be negative"))
}

/// Parse a percent such as `"7.5"` into basis points.
pub(crate) fn parse_basis_points(percent: &str, field: &str) -> Result<u32, StatusError> {
    parse_percent_basis_points(percent.trim())
        .ok_or(percent)
        .or_400(&format!("invalid {field}"))
}

/// Basis points as a two-place percent, e.g. `"5.00"`.
pub(crate) fn format_basis_points(basis_points: u32) -> String {
    format!("{}.{:02}", basis_points / 100, basis_points % 100)
}

/// Currency an order was placed in.
pub(crate) fn stored_currency(code: &str) -> Result<&'static Currency, StatusError> {
    Currency::find(code)
        .ok_or(code)
        .or_500("order has an unknown currency")
}
