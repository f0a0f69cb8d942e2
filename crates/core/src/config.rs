//! Pricing Configuration

use decimal_percentage::Percentage;
use rusty_money::{
    Money,
    iso::{self, Currency},
};

use crate::{
    delivery::{AddOns, DeliveryTier},
    errors::CalculationError,
};

/// Whether add-on fees are included in the taxable base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddOnTaxPolicy {
    /// Add-on fees are added after tax and never taxed.
    #[default]
    Untaxed,

    /// Add-on fees are added to the taxable base alongside shipping.
    Taxed,
}

/// Flat fee per delivery tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryFees<'a> {
    /// Standard delivery fee.
    pub standard: Money<'a, Currency>,

    /// Express delivery fee.
    pub express: Money<'a, Currency>,

    /// Overnight delivery fee.
    pub overnight: Money<'a, Currency>,
}

impl<'a> DeliveryFees<'a> {
    /// Return the flat fee for a tier.
    pub fn fee(&self, tier: DeliveryTier) -> Money<'a, Currency> {
        match tier {
            DeliveryTier::Standard => self.standard,
            DeliveryTier::Express => self.express,
            DeliveryTier::Overnight => self.overnight,
        }
    }
}

/// Store-wide pricing parameters.
#[derive(Debug, Clone, Copy)]
pub struct PricingConfig<'a> {
    /// Currency every line item must be priced in.
    pub currency: &'a Currency,

    /// Tax rate applied to the discounted subtotal plus shipping.
    pub tax_rate: Percentage,

    /// Standard delivery is free when the discounted subtotal exceeds this.
    pub free_shipping_threshold: Money<'a, Currency>,

    /// Flat delivery fees.
    pub delivery_fees: DeliveryFees<'a>,

    /// Shipping protection fee.
    pub insurance_fee: Money<'a, Currency>,

    /// Gift wrapping fee.
    pub gift_wrap_fee: Money<'a, Currency>,

    /// Add-on tax treatment.
    pub add_on_tax: AddOnTaxPolicy,
}

impl PricingConfig<'static> {
    /// The storefront's stock configuration: USD, 8% tax, free standard
    /// delivery above $100.
    pub fn storefront_defaults() -> Self {
        Self {
            currency: iso::USD,
            tax_rate: Percentage::from(0.08),
            free_shipping_threshold: Money::from_minor(10_000, iso::USD),
            delivery_fees: DeliveryFees {
                standard: Money::from_minor(999, iso::USD),
                express: Money::from_minor(1_999, iso::USD),
                overnight: Money::from_minor(2_999, iso::USD),
            },
            insurance_fee: Money::from_minor(499, iso::USD),
            gift_wrap_fee: Money::from_minor(399, iso::USD),
            add_on_tax: AddOnTaxPolicy::Untaxed,
        }
    }
}

impl<'a> PricingConfig<'a> {
    /// Sum of the fees for the selected add-ons.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::Overflow`] if the fees do not fit in minor
    /// units.
    pub fn add_on_fees(&self, add_ons: AddOns) -> Result<Money<'a, Currency>, CalculationError> {
        let mut minor: i64 = 0;

        if add_ons.insurance {
            minor = minor
                .checked_add(self.insurance_fee.to_minor_units())
                .ok_or(CalculationError::Overflow)?;
        }

        if add_ons.gift_wrap {
            minor = minor
                .checked_add(self.gift_wrap_fee.to_minor_units())
                .ok_or(CalculationError::Overflow)?;
        }

        Ok(Money::from_minor(minor, self.currency))
    }

    /// Zero in the store currency.
    pub fn zero(&self) -> Money<'a, Currency> {
        Money::from_minor(0, self.currency)
    }
}
