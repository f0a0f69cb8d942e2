//! Orders Data

use storefront::{
    calculator::OrderCalculation,
    delivery::{AddOns, DeliveryTier},
};

use crate::domain::{
    orders::records::{
        AffiliateCommissionRecord, Customer, OrderItemRecord, OrderRecord, OrderUuid,
        PaymentMethod, ShippingAddress,
    },
    products::records::ProductUuid,
};

/// A requested product and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Everything needed to price a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartRequest {
    pub items: Vec<CartLine>,
    pub coupon_code: Option<String>,
    pub delivery: DeliveryTier,
    pub add_ons: AddOns,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub cart: CartRequest,
    pub affiliate_code: Option<String>,
}

/// An order with its items and any affiliate commission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
    pub commission: Option<AffiliateCommissionRecord>,
}

/// Result of placing an order.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedOrder {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
    pub calculation: OrderCalculation<'static>,
    pub commission: Option<AffiliateCommissionRecord>,
}
