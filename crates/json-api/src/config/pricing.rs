//! Pricing Config

use clap::{Args, ValueEnum};
use decimal_percentage::Percentage;
use rusty_money::{Findable, Money, iso::Currency};
use storefront::{
    config::{AddOnTaxPolicy, DeliveryFees, PricingConfig},
    discounts::is_unit_range,
    money::{AmountError, parse_amount},
};
use thiserror::Error;

/// Whether add-on fees are taxed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AddOnTax {
    /// Add-ons are added after tax.
    Untaxed,

    /// Add-ons are included in the taxable base.
    Taxed,
}

impl From<AddOnTax> for AddOnTaxPolicy {
    fn from(value: AddOnTax) -> Self {
        match value {
            AddOnTax::Untaxed => Self::Untaxed,
            AddOnTax::Taxed => Self::Taxed,
        }
    }
}

/// Invalid pricing settings.
#[derive(Debug, Error)]
pub enum PricingConfigError {
    #[error("unknown store currency: {0}")]
    UnknownCurrency(String),

    #[error("tax rate must be a fraction between 0 and 1, got {0}")]
    InvalidTaxRate(String),

    #[error("invalid {setting}: {source}")]
    InvalidAmount {
        setting: &'static str,
        #[source]
        source: AmountError,
    },

    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),
}

/// Store pricing settings.
#[derive(Debug, Args)]
pub struct PricingArgs {
    /// ISO 4217 store currency
    #[arg(long, env = "STORE_CURRENCY", default_value = "USD")]
    pub store_currency: String,

    /// Tax rate as a fraction of the taxable base
    #[arg(long, env = "TAX_RATE", default_value = "0.08")]
    pub tax_rate: String,

    /// Standard delivery is free when the discounted subtotal exceeds this amount
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value = "100.00")]
    pub free_shipping_threshold: String,

    /// Standard delivery fee
    #[arg(long, env = "STANDARD_DELIVERY_FEE", default_value = "9.99")]
    pub standard_delivery_fee: String,

    /// Express delivery fee
    #[arg(long, env = "EXPRESS_DELIVERY_FEE", default_value = "19.99")]
    pub express_delivery_fee: String,

    /// Overnight delivery fee
    #[arg(long, env = "OVERNIGHT_DELIVERY_FEE", default_value = "29.99")]
    pub overnight_delivery_fee: String,

    /// Shipping insurance fee
    #[arg(long, env = "INSURANCE_FEE", default_value = "4.99")]
    pub insurance_fee: String,

    /// Gift wrap fee
    #[arg(long, env = "GIFT_WRAP_FEE", default_value = "3.99")]
    pub gift_wrap_fee: String,

    /// Add-on tax treatment (untaxed, taxed)
    #[arg(long, env = "ADD_ON_TAX", value_enum, default_value_t = AddOnTax::Untaxed)]
    pub add_on_tax: AddOnTax,
}

impl PricingArgs {
    /// Build the calculator configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingConfigError`] for an unknown currency, a tax rate
    /// outside 0-1 or an amount that is malformed or negative.
    pub fn pricing_config(&self) -> Result<PricingConfig<'static>, PricingConfigError> {
        let currency = Currency::find(&self.store_currency)
            .ok_or_else(|| PricingConfigError::UnknownCurrency(self.store_currency.clone()))?;

        let tax_rate = Percentage::try_from(self.tax_rate.trim())
            .ok()
            .filter(is_unit_range)
            .ok_or_else(|| PricingConfigError::InvalidTaxRate(self.tax_rate.clone()))?;

        Ok(PricingConfig {
            currency,
            tax_rate,
            free_shipping_threshold: amount(
                "FREE_SHIPPING_THRESHOLD",
                &self.free_shipping_threshold,
                currency,
            )?,
            delivery_fees: DeliveryFees {
                standard: amount("STANDARD_DELIVERY_FEE", &self.standard_delivery_fee, currency)?,
                express: amount("EXPRESS_DELIVERY_FEE", &self.express_delivery_fee, currency)?,
                overnight: amount(
                    "OVERNIGHT_DELIVERY_FEE",
                    &self.overnight_delivery_fee,
                    currency,
                )?,
            },
            insurance_fee: amount("INSURANCE_FEE", &self.insurance_fee, currency)?,
            gift_wrap_fee: amount("GIFT_WRAP_FEE", &self.gift_wrap_fee, currency)?,
            add_on_tax: self.add_on_tax.into(),
        })
    }
}

fn amount(
    setting: &'static str,
    value: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingConfigError> {
    let money = parse_amount(value, currency)
        .map_err(|source| PricingConfigError::InvalidAmount { setting, source })?;

    if money.to_minor_units() < 0 {
        return Err(PricingConfigError::NegativeAmount(setting));
    }

    Ok(money)
}
