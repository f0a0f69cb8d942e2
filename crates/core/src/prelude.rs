//! Prelude

pub use crate::{
    calculator::{CartOptions, OrderCalculation, calculate_cart_totals},
    commission::{calculate_affiliate_commission, default_commission_rate},
    config::{AddOnTaxPolicy, DeliveryFees, PricingConfig},
    coupons::{CouponDiscount, CouponRule},
    delivery::{AddOns, DeliveryTier},
    errors::{CalculationError, PricingError, ValidationError},
    items::LineItem,
};
