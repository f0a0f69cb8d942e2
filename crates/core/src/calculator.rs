//! Order Total Calculator
//!
//! Prices a cart in a fixed order: subtotal, coupon discount, shipping, tax,
//! add-ons, total. Every step works in integer minor units of the store
//! currency, and each percentage product is rounded once, half away from zero.

use rusty_money::{Money, iso::Currency};

use crate::{
    config::{AddOnTaxPolicy, PricingConfig},
    coupons::CouponRule,
    delivery::{AddOns, DeliveryTier},
    discounts::percent_of_minor,
    errors::{CalculationError, PricingError, ValidationError},
    items::LineItem,
};

/// Checkout choices that modify the total.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartOptions<'a> {
    /// Coupon the customer is eligible to use.
    pub coupon: Option<CouponRule<'a>>,

    /// Selected delivery tier.
    pub delivery: DeliveryTier,

    /// Selected add-ons.
    pub add_ons: AddOns,
}

/// Breakdown of a priced cart.
///
/// `total == subtotal - discount + shipping + tax + add_ons` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderCalculation<'a> {
    /// Sum of unit price × quantity.
    pub subtotal: Money<'a, Currency>,

    /// Coupon discount, never more than the subtotal.
    pub discount: Money<'a, Currency>,

    /// Delivery fee after the free-shipping rule.
    pub shipping: Money<'a, Currency>,

    /// Tax on the discounted subtotal plus shipping.
    pub tax: Money<'a, Currency>,

    /// Add-on fees.
    pub add_ons: Money<'a, Currency>,

    /// Amount payable.
    pub total: Money<'a, Currency>,
}

impl<'a> OrderCalculation<'a> {
    /// Subtotal less discount.
    pub fn after_discount(&self) -> Money<'a, Currency> {
        Money::from_minor(
            self.subtotal.to_minor_units() - self.discount.to_minor_units(),
            self.subtotal.currency(),
        )
    }
}

/// Price a cart.
///
/// # Errors
///
/// - [`ValidationError`]: the cart is empty, a quantity is zero, a unit price
///   is negative or a line item is priced in another currency.
/// - [`CalculationError`]: the coupon rule is inconsistent or an amount
///   overflows.
pub fn calculate_cart_totals<'a, P>(
    items: &[LineItem<'a, P>],
    options: &CartOptions<'a>,
    config: &PricingConfig<'a>,
) -> Result<OrderCalculation<'a>, PricingError> {
    validate_items(items, config.currency)?;

    let subtotal = subtotal(items, config.currency)?;

    let discount = match &options.coupon {
        Some(rule) => rule.discount_for(&subtotal)?,
        None => config.zero(),
    };

    let after_discount_minor = subtotal.to_minor_units() - discount.to_minor_units();
    let shipping_minor = shipping_fee(options.delivery, after_discount_minor, config);
    let add_ons_minor = config.add_on_fees(options.add_ons)?.to_minor_units();

    let taxable_minor = match config.add_on_tax {
        AddOnTaxPolicy::Untaxed => checked_sum(&[after_discount_minor, shipping_minor])?,
        AddOnTaxPolicy::Taxed => {
            checked_sum(&[after_discount_minor, shipping_minor, add_ons_minor])?
        }
    };

    let tax_minor = percent_of_minor(&config.tax_rate, taxable_minor)?;

    let total_minor = checked_sum(&[
        after_discount_minor,
        shipping_minor,
        tax_minor,
        add_ons_minor,
    ])?;

    Ok(OrderCalculation {
        subtotal,
        discount,
        shipping: Money::from_minor(shipping_minor, config.currency),
        tax: Money::from_minor(tax_minor, config.currency),
        add_ons: Money::from_minor(add_ons_minor, config.currency),
        total: Money::from_minor(total_minor, config.currency),
    })
}

/// Sum of line totals.
///
/// # Errors
///
/// Returns [`CalculationError::Overflow`] if the sum does not fit in minor
/// units, or a money error on currency mismatch.
pub fn subtotal<'a, P>(
    items: &[LineItem<'a, P>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            let line_total = item.line_total()?;

            acc.to_minor_units()
                .checked_add(line_total.to_minor_units())
                .ok_or(PricingError::Calculation(CalculationError::Overflow))
                .map(|minor| Money::from_minor(minor, currency))
        })
}

fn validate_items<P>(items: &[LineItem<'_, P>], currency: &Currency) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyCart);
    }

    for (line, item) in items.iter().enumerate() {
        if item.quantity() == 0 {
            return Err(ValidationError::ZeroQuantity { line });
        }

        if item.unit_price().to_minor_units() < 0 {
            return Err(ValidationError::NegativeUnitPrice { line });
        }

        if item.unit_price().currency() != currency {
            return Err(ValidationError::CurrencyMismatch {
                line,
                expected: currency.iso_alpha_code.to_string(),
                found: item.unit_price().currency().iso_alpha_code.to_string(),
            });
        }
    }

    Ok(())
}

fn shipping_fee(tier: DeliveryTier, after_discount_minor: i64, config: &PricingConfig<'_>) -> i64 {
    let waived = tier == DeliveryTier::Standard
        && after_discount_minor > config.free_shipping_threshold.to_minor_units();

    if waived {
        0
    } else {
        config.delivery_fees.fee(tier).to_minor_units()
    }
}

fn checked_sum(values: &[i64]) -> Result<i64, CalculationError> {
    values
        .iter()
        .try_fold(0_i64, |acc, value| acc.checked_add(*value))
        .ok_or(CalculationError::Overflow)
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rusty_money::iso::{EUR, USD};
    use testresult::TestResult;

    use super::*;

    fn usd(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, USD)
    }

    #[test]
    fn empty_cart_is_rejected() {
        let items: [LineItem<'static, ()>; 0] = [];

        let result = calculate_cart_totals(
            &items,
            &CartOptions::default(),
            &PricingConfig::storefront_defaults(),
        );

        assert_eq!(
            result,
            Err(PricingError::Validation(ValidationError::EmptyCart))
        );
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let items = [LineItem::new(1, 1, usd(100)), LineItem::new(2, 0, usd(100))];

        let result = calculate_cart_totals(
            &items,
            &CartOptions::default(),
            &PricingConfig::storefront_defaults(),
        );

        assert_eq!(
            result,
            Err(PricingError::Validation(ValidationError::ZeroQuantity {
                line: 1
            }))
        );
    }

    #[test]
    fn negative_unit_price_is_rejected() {
        let items = [LineItem::new(1, 1, usd(-1))];

        let result = calculate_cart_totals(
            &items,
            &CartOptions::default(),
            &PricingConfig::storefront_defaults(),
        );

        assert_eq!(
            result,
            Err(PricingError::Validation(
                ValidationError::NegativeUnitPrice { line: 0 }
            ))
        );
    }

    #[test]
    fn foreign_currency_line_is_rejected() {
        let items = [LineItem::new(1, 1, Money::from_minor(100, EUR))];

        let result = calculate_cart_totals(
            &items,
            &CartOptions::default(),
            &PricingConfig::storefront_defaults(),
        );

        assert!(matches!(
            result,
            Err(PricingError::Validation(
                ValidationError::CurrencyMismatch { line: 0, .. }
            ))
        ));
    }

    #[test]
    fn standard_shipping_charged_below_threshold() -> TestResult {
        let items = [LineItem::new(1, 1, usd(5_000))];

        let calculation = calculate_cart_totals(
            &items,
            &CartOptions::default(),
            &PricingConfig::storefront_defaults(),
        )?;

        assert_eq!(calculation.shipping, usd(999));

        Ok(())
    }

    #[test]
    fn standard_shipping_free_above_threshold() -> TestResult {
        let items = [LineItem::new(1, 1, usd(15_000))];

        let calculation = calculate_cart_totals(
            &items,
            &CartOptions::default(),
            &PricingConfig::storefront_defaults(),
        )?;

        assert_eq!(calculation.shipping, usd(0));

        Ok(())
    }

    #[test]
    fn standard_shipping_charged_at_exact_threshold() -> TestResult {
        let items = [LineItem::new(1, 1, usd(10_000))];

        let calculation = calculate_cart_totals(
            &items,
            &CartOptions::default(),
            &PricingConfig::storefront_defaults(),
        )?;

        assert_eq!(calculation.shipping, usd(999));

        Ok(())
    }

    #[test]
    fn free_shipping_uses_discounted_subtotal() -> TestResult {
        let items = [LineItem::new(1, 1, usd(11_000))];

        let options = CartOptions {
            coupon: Some(CouponRule::fixed(usd(2_000))),
            ..CartOptions::default()
        };

        let calculation =
            calculate_cart_totals(&items, &options, &PricingConfig::storefront_defaults())?;

        assert_eq!(calculation.after_discount(), usd(9_000));
        assert_eq!(calculation.shipping, usd(999));

        Ok(())
    }

    #[test]
    fn express_and_overnight_always_charged() -> TestResult {
        let items = [LineItem::new(1, 2, usd(50_000))];
        let config = PricingConfig::storefront_defaults();

        for (delivery, fee) in [
            (DeliveryTier::Express, usd(1_999)),
            (DeliveryTier::Overnight, usd(2_999)),
        ] {
            let options = CartOptions {
                delivery,
                ..CartOptions::default()
            };

            let calculation = calculate_cart_totals(&items, &options, &config)?;

            assert_eq!(calculation.shipping, fee);
        }

        Ok(())
    }

    #[test]
    fn tax_is_charged_on_discounted_subtotal_plus_shipping() -> TestResult {
        let items = [LineItem::new(1, 1, usd(10_000))];

        let options = CartOptions {
            coupon: Some(CouponRule::fixed(usd(1_000))),
            ..CartOptions::default()
        };

        let calculation =
            calculate_cart_totals(&items, &options, &PricingConfig::storefront_defaults())?;

        // (90.00 + 9.99) * 8% = 7.9992
        assert_eq!(calculation.shipping, usd(999));
        assert_eq!(calculation.tax, usd(800));
        assert_eq!(calculation.total, usd(9_000 + 999 + 800));

        Ok(())
    }

    #[test]
    fn add_ons_are_untaxed_by_default() -> TestResult {
        let items = [LineItem::new(1, 1, usd(20_000))];

        let options = CartOptions {
            add_ons: AddOns {
                insurance: true,
                gift_wrap: true,
            },
            ..CartOptions::default()
        };

        let calculation =
            calculate_cart_totals(&items, &options, &PricingConfig::storefront_defaults())?;

        assert_eq!(calculation.add_ons, usd(898));
        assert_eq!(calculation.tax, usd(1_600));
        assert_eq!(calculation.total, usd(20_000 + 1_600 + 898));

        Ok(())
    }

    #[test]
    fn add_ons_can_be_taxed() -> TestResult {
        let items = [LineItem::new(1, 1, usd(20_000))];

        let options = CartOptions {
            add_ons: AddOns {
                insurance: true,
                gift_wrap: false,
            },
            ..CartOptions::default()
        };

        let config = PricingConfig {
            add_on_tax: AddOnTaxPolicy::Taxed,
            ..PricingConfig::storefront_defaults()
        };

        let calculation = calculate_cart_totals(&items, &options, &config)?;

        // (200.00 + 4.99) * 8% = 16.3992
        assert_eq!(calculation.tax, usd(1_640));
        assert_eq!(calculation.total, usd(20_000 + 499 + 1_640));

        Ok(())
    }

    #[test]
    fn zero_tax_rate_charges_no_tax() -> TestResult {
        let items = [LineItem::new(1, 3, usd(333))];

        let config = PricingConfig {
            tax_rate: Percentage::from(0.0),
            ..PricingConfig::storefront_defaults()
        };

        let calculation = calculate_cart_totals(&items, &CartOptions::default(), &config)?;

        assert_eq!(calculation.tax, usd(0));
        assert_eq!(calculation.total, usd(999 + 999));

        Ok(())
    }

    #[test]
    fn oversized_add_on_fee_returns_overflow() {
        let items = [LineItem::new(1, 1, usd(1_000))];

        let config = PricingConfig {
            insurance_fee: usd(i64::MAX),
            ..PricingConfig::storefront_defaults()
        };

        let options = CartOptions {
            add_ons: AddOns {
                insurance: true,
                gift_wrap: true,
            },
            ..CartOptions::default()
        };

        assert_eq!(
            calculate_cart_totals(&items, &options, &config),
            Err(PricingError::Calculation(CalculationError::Overflow))
        );
    }

    #[test]
    fn subtotal_sums_line_totals() -> TestResult {
        let items = [LineItem::new(1, 1, usd(119_900)), LineItem::new(2, 2, usd(34_900))];

        assert_eq!(subtotal(&items, USD)?, usd(189_700));

        Ok(())
    }
}
