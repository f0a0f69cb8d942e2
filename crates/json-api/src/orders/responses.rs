//! Order Responses

use rusty_money::iso::Currency;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{
    AffiliateCommissionRecord, Customer, OrderItemRecord, OrderRecord,
};

use crate::{
    amounts::{format_basis_points, format_minor_units},
    cart::{
        requests::{AddOnsPayload, DeliveryOption},
        responses::CalculationResponse,
    },
    orders::requests::{PaymentMethodOption, ShippingAddressPayload},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,

    /// Catalog price when the order was placed
    pub unit_price: String,
}

impl OrderItemResponse {
    fn new(item: OrderItemRecord, currency: &Currency) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_id: item.product_uuid.into(),
            quantity: item.quantity,
            unit_price: format_minor_units(item.unit_price, currency),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,

    pub shipping_address: ShippingAddressPayload,
    pub payment_method: PaymentMethodOption,
    pub delivery: DeliveryOption,
    pub add_ons: AddOnsPayload,
    pub coupon_code: Option<String>,
    pub affiliate_id: Option<Uuid>,
    pub currency: String,
    pub subtotal: String,
    pub discount: String,
    pub shipping: String,
    pub tax: String,
    pub add_on_fees: String,
    pub total: String,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
}

impl OrderResponse {
    pub(crate) fn new(
        order: OrderRecord,
        items: Vec<OrderItemRecord>,
        currency: &Currency,
    ) -> Self {
        let (user_id, guest_email) = match order.customer {
            Customer::User(user) => (Some(user), None),
            Customer::Guest { email } => (None, Some(email)),
        };

        Self {
            uuid: order.uuid.into(),
            user_id,
            guest_email,
            shipping_address: order.shipping_address.into(),
            payment_method: order.payment_method.into(),
            delivery: order.delivery.into(),
            add_ons: order.add_ons.into(),
            coupon_code: order.coupon_code,
            affiliate_id: order.affiliate_uuid.map(Into::into),
            currency: order.currency,
            subtotal: format_minor_units(order.subtotal, currency),
            discount: format_minor_units(order.discount, currency),
            shipping: format_minor_units(order.shipping, currency),
            tax: format_minor_units(order.tax, currency),
            add_on_fees: format_minor_units(order.add_on_fees, currency),
            total: format_minor_units(order.total, currency),
            status: order.status,
            items: items
                .into_iter()
                .map(|item| OrderItemResponse::new(item, currency))
                .collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CommissionResponse {
    pub uuid: Uuid,
    pub affiliate_id: Uuid,

    /// Percent of the order total, e.g. `"5.00"`
    pub commission_rate: String,

    pub amount: String,
}

impl CommissionResponse {
    pub(crate) fn new(commission: AffiliateCommissionRecord, currency: &Currency) -> Self {
        Self {
            uuid: commission.uuid.into(),
            affiliate_id: commission.affiliate_uuid.into(),
            commission_rate: format_basis_points(commission.commission_rate),
            amount: format_minor_units(commission.amount, currency),
        }
    }
}

/// Place Order Response
///
/// `success` is false only together with `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderResponse>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<CalculationResponse>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<CommissionResponse>,
}

impl CreateOrderResponse {
    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            order: None,
            calculation: None,
            commission: None,
        }
    }
}

/// Order Details Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailsResponse {
    pub order: OrderResponse,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<CommissionResponse>,
}
