//! Cart request payloads shared by calculation and checkout.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::delivery::{AddOns, DeliveryTier};
use storefront_app::domain::orders::data::{CartLine, CartRequest};

/// Delivery speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DeliveryOption {
    #[default]
    Standard,
    Express,
    Overnight,
}

impl From<DeliveryOption> for DeliveryTier {
    fn from(option: DeliveryOption) -> Self {
        match option {
            DeliveryOption::Standard => Self::Standard,
            DeliveryOption::Express => Self::Express,
            DeliveryOption::Overnight => Self::Overnight,
        }
    }
}

impl From<DeliveryTier> for DeliveryOption {
    fn from(tier: DeliveryTier) -> Self {
        match tier {
            DeliveryTier::Standard => Self::Standard,
            DeliveryTier::Express => Self::Express,
            DeliveryTier::Overnight => Self::Overnight,
        }
    }
}

/// Optional extras charged per order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct AddOnsPayload {
    pub insurance: bool,
    pub gift_wrap: bool,
}

impl From<AddOnsPayload> for AddOns {
    fn from(request: AddOnsPayload) -> Self {
        Self {
            insurance: request.insurance,
            gift_wrap: request.gift_wrap,
        }
    }
}

impl From<AddOns> for AddOnsPayload {
    fn from(add_ons: AddOns) -> Self {
        Self {
            insurance: add_ons.insurance,
            gift_wrap: add_ons.gift_wrap,
        }
    }
}

/// A product and the quantity wanted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

/// Cart contents and checkout options.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartPayload {
    pub items: Vec<CartItemRequest>,

    #[serde(default)]
    pub coupon_code: Option<String>,

    #[serde(default)]
    pub delivery: DeliveryOption,

    #[serde(default)]
    pub add_ons: AddOnsPayload,
}

impl From<CartPayload> for CartRequest {
    fn from(payload: CartPayload) -> Self {
        Self {
            items: payload
                .items
                .into_iter()
                .map(|item| CartLine {
                    product_uuid: item.product_id.into(),
                    quantity: item.quantity,
                })
                .collect(),
            coupon_code: payload
                .coupon_code
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty()),
            delivery: payload.delivery.into(),
            add_ons: payload.add_ons.into(),
        }
    }
}
