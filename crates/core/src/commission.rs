//! Affiliate Commission

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::{is_unit_range, percent_of_minor},
    errors::{PricingError, ValidationError},
};

/// Commission rate applied when an affiliate has none on record.
pub fn default_commission_rate() -> Percentage {
    Percentage::from(0.05)
}

/// Commission owed to a referring affiliate on an order total.
///
/// `None` uses [`default_commission_rate`].
///
/// # Errors
///
/// - [`ValidationError::NegativeOrderTotal`]: the total is below zero.
/// - [`ValidationError::CommissionRateOutOfRange`]: the rate is outside 0-100%.
pub fn calculate_affiliate_commission<'a>(
    order_total: &Money<'a, Currency>,
    rate: Option<Percentage>,
) -> Result<Money<'a, Currency>, PricingError> {
    let rate = rate.unwrap_or_else(default_commission_rate);

    if order_total.to_minor_units() < 0 {
        return Err(ValidationError::NegativeOrderTotal.into());
    }

    if !is_unit_range(&rate) {
        return Err(ValidationError::CommissionRateOutOfRange.into());
    }

    let commission = percent_of_minor(&rate, order_total.to_minor_units())?;

    Ok(Money::from_minor(commission, order_total.currency()))
}
