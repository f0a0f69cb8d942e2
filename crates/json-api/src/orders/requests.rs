//! Order Requests

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    data::NewOrder,
    records::{Customer, OrderUuid, PaymentMethod, ShippingAddress},
};

use crate::cart::requests::{AddOnsPayload, CartItemRequest, CartPayload, DeliveryOption};

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PaymentMethodOption {
    Card,
    Paypal,
    CashOnDelivery,
}

impl From<PaymentMethodOption> for PaymentMethod {
    fn from(option: PaymentMethodOption) -> Self {
        match option {
            PaymentMethodOption::Card => Self::Card,
            PaymentMethodOption::Paypal => Self::Paypal,
            PaymentMethodOption::CashOnDelivery => Self::CashOnDelivery,
        }
    }
}

impl From<PaymentMethod> for PaymentMethodOption {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Card => Self::Card,
            PaymentMethod::Paypal => Self::Paypal,
            PaymentMethod::CashOnDelivery => Self::CashOnDelivery,
        }
    }
}

/// Delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingAddressPayload {
    pub name: String,
    pub line1: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,

    pub city: String,
    pub postcode: String,
    pub country: String,
}

impl From<ShippingAddressPayload> for ShippingAddress {
    fn from(payload: ShippingAddressPayload) -> Self {
        Self {
            name: payload.name,
            line1: payload.line1,
            line2: payload.line2.filter(|line| !line.trim().is_empty()),
            city: payload.city,
            postcode: payload.postcode,
            country: payload.country,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressPayload {
    fn from(address: ShippingAddress) -> Self {
        Self {
            name: address.name,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            postcode: address.postcode,
            country: address.country,
        }
    }
}

/// Place Order Request
///
/// Exactly one of `user_id` and `guest_email` identifies the customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Client-chosen order UUID, generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub user_id: Option<Uuid>,

    #[serde(default)]
    pub guest_email: Option<String>,

    pub items: Vec<CartItemRequest>,

    #[serde(default)]
    pub coupon_code: Option<String>,

    #[serde(default)]
    pub delivery: DeliveryOption,

    #[serde(default)]
    pub add_ons: AddOnsPayload,

    pub shipping_address: ShippingAddressPayload,

    pub payment_method: PaymentMethodOption,

    /// Referral code of the affiliate that sent the customer
    #[serde(default)]
    pub affiliate_code: Option<String>,
}

/// Customer identification was missing or ambiguous.
pub(crate) const CUSTOMER_REQUIRED: &str = "exactly one of user_id or guest_email is required";

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = &'static str;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        let guest_email = request
            .guest_email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());

        let customer = match (request.user_id, guest_email) {
            (Some(user), None) => Customer::User(user),
            (None, Some(email)) => Customer::Guest { email },
            _ => return Err(CUSTOMER_REQUIRED),
        };

        let cart = CartPayload {
            items: request.items,
            coupon_code: request.coupon_code,
            delivery: request.delivery,
            add_ons: request.add_ons,
        };

        Ok(Self {
            uuid: request.uuid.map_or_else(OrderUuid::new, OrderUuid::from_uuid),
            customer,
            shipping_address: request.shipping_address.into(),
            payment_method: request.payment_method.into(),
            cart: cart.into(),
            affiliate_code: request
                .affiliate_code
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty()),
        })
    }
}
