//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::calculator::OrderCalculation;

use crate::amounts::to_decimal_string;

/// Priced cart, all amounts as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CalculationResponse {
    pub currency: String,
    pub subtotal: String,
    pub discount: String,
    pub shipping: String,
    pub tax: String,
    pub add_ons: String,
    pub total: String,
}

impl From<&OrderCalculation<'_>> for CalculationResponse {
    fn from(calculation: &OrderCalculation<'_>) -> Self {
        Self {
            currency: calculation.total.currency().iso_alpha_code.to_string(),
            subtotal: to_decimal_string(&calculation.subtotal),
            discount: to_decimal_string(&calculation.discount),
            shipping: to_decimal_string(&calculation.shipping),
            tax: to_decimal_string(&calculation.tax),
            add_ons: to_decimal_string(&calculation.add_ons),
            total: to_decimal_string(&calculation.total),
        }
    }
}
