//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use storefront::delivery::{AddOns, DeliveryTier};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    domain::{affiliates::records::AffiliateUuid, products::records::ProductUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Affiliate Commission UUID
pub type AffiliateCommissionUuid = TypedUuid<AffiliateCommissionRecord>;

/// Who placed an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Customer {
    /// A signed-in user.
    User(Uuid),

    /// A guest checkout, identified by email.
    Guest { email: String },
}

/// Delivery address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub postcode: String,
    pub country: String,
}

impl ShippingAddress {
    /// All mandatory lines are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [
            &self.name,
            &self.line1,
            &self.city,
            &self.postcode,
            &self.country,
        ]
        .iter()
        .all(|line| !line.trim().is_empty())
    }
}

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Paypal,
    CashOnDelivery,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
            Self::CashOnDelivery => "cash_on_delivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "paypal" => Ok(Self::Paypal),
            "cash_on_delivery" => Ok(Self::CashOnDelivery),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Order Record
///
/// Amounts are minor units of `currency`, as calculated when the order was
/// placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub delivery: DeliveryTier,
    pub add_ons: AddOns,
    pub coupon_code: Option<String>,
    pub affiliate_uuid: Option<AffiliateUuid>,
    pub currency: String,
    pub subtotal: u64,
    pub discount: u64,
    pub shipping: u64,
    pub tax: u64,
    pub add_on_fees: u64,
    pub total: u64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
///
/// `unit_price` is the catalog price at the time of ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub position: u32,
    pub quantity: u32,
    pub unit_price: u64,
    pub created_at: Timestamp,
}

/// Affiliate Commission Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateCommissionRecord {
    pub uuid: AffiliateCommissionUuid,
    pub affiliate_uuid: AffiliateUuid,
    pub order_uuid: OrderUuid,
    pub commission_rate: u32,
    pub amount: u64,
    pub created_at: Timestamp,
}
