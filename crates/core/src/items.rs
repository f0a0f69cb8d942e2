//! Line Items

use rusty_money::{Money, iso::Currency};

use crate::errors::{CalculationError, PricingError};

/// A priced cart or order entry.
///
/// `P` is whatever the caller uses to refer to a product; the calculator never
/// looks inside it. The unit price is a snapshot taken when the line item is
/// built, so a total can always be recomputed from recorded line items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItem<'a, P> {
    product: P,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a, P> LineItem<'a, P> {
    /// Create a new line item.
    pub fn new(product: P, quantity: u32, unit_price: Money<'a, Currency>) -> Self {
        Self {
            product,
            quantity,
            unit_price,
        }
    }

    /// Return the product reference.
    pub fn product(&self) -> &P {
        &self.product
    }

    /// Return the quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Return the unit price snapshot.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::Overflow`] if the product does not fit in
    /// minor units.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, PricingError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(CalculationError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}
