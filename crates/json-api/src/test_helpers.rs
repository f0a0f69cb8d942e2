//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rusty_money::iso::USD;
use salvo::{affix_state::inject, prelude::*};
use storefront::delivery::{AddOns, DeliveryTier};
use storefront_app::{
    context::AppContext,
    domain::{
        affiliates::{
            MockAffiliatesService,
            records::{AffiliateRecord, AffiliateUuid},
        },
        coupons::{
            MockCouponsService,
            records::{CouponKind, CouponRecord, CouponUuid},
        },
        orders::{
            MockOrdersService,
            records::{Customer, OrderRecord, OrderUuid, PaymentMethod, ShippingAddress},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
    },
};

use crate::state::State;

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn strict_coupons_mock() -> MockCouponsService {
    let mut coupons = MockCouponsService::new();

    coupons.expect_create_coupon().never();
    coupons.expect_get_coupon().never();

    coupons
}

pub(crate) fn strict_affiliates_mock() -> MockAffiliatesService {
    let mut affiliates = MockAffiliatesService::new();

    affiliates.expect_create_affiliate().never();
    affiliates.expect_get_affiliate().never();

    affiliates
}

pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_calculate_cart().never();
    orders.expect_create_order_with_calculations().never();
    orders.expect_get_order().never();

    orders
}

/// Mocks backing one test service. Untouched services stay strict.
pub(crate) struct TestServices {
    pub(crate) products: MockProductsService,
    pub(crate) coupons: MockCouponsService,
    pub(crate) affiliates: MockAffiliatesService,
    pub(crate) orders: MockOrdersService,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            products: strict_products_mock(),
            coupons: strict_coupons_mock(),
            affiliates: strict_affiliates_mock(),
            orders: strict_orders_mock(),
        }
    }
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            products: Arc::new(self.products),
            coupons: Arc::new(self.coupons),
            affiliates: Arc::new(self.affiliates),
            orders: Arc::new(self.orders),
        };

        State::from_app_context(app, USD)
    }

    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    TestServices {
        products,
        ..TestServices::default()
    }
    .service(route)
}

pub(crate) fn coupons_service(coupons: MockCouponsService, route: Router) -> Service {
    TestServices {
        coupons,
        ..TestServices::default()
    }
    .service(route)
}

pub(crate) fn affiliates_service(affiliates: MockAffiliatesService, route: Router) -> Service {
    TestServices {
        affiliates,
        ..TestServices::default()
    }
    .service(route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    TestServices {
        orders,
        ..TestServices::default()
    }
    .service(route)
}

pub(crate) fn make_product(uuid: ProductUuid, name: &str, price: u64) -> ProductRecord {
    ProductRecord {
        uuid,
        name: name.to_string(),
        price,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_coupon(code: &str, kind: CouponKind, value: u64) -> CouponRecord {
    CouponRecord {
        uuid: CouponUuid::new(),
        code: code.to_string(),
        kind,
        value,
        min_purchase: None,
        max_discount: None,
        usage_limit: None,
        used_count: 0,
        expires_at: None,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_affiliate(code: &str, commission_rate: Option<u32>) -> AffiliateRecord {
    AffiliateRecord {
        uuid: AffiliateUuid::new(),
        code: code.to_string(),
        name: "Partner".to_string(),
        commission_rate,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        name: "Ada Lovelace".to_string(),
        line1: "12 St James's Square".to_string(),
        line2: None,
        city: "London".to_string(),
        postcode: "SW1Y 4JH".to_string(),
        country: "GB".to_string(),
    }
}

/// The SAVE10 order: 1897.00 subtotal, 189.70 off, free shipping, 136.58 tax.
pub(crate) fn make_order(uuid: OrderUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        customer: Customer::Guest {
            email: "ada@example.com".to_string(),
        },
        shipping_address: shipping_address(),
        payment_method: PaymentMethod::Card,
        delivery: DeliveryTier::Standard,
        add_ons: AddOns::NONE,
        coupon_code: Some("SAVE10".to_string()),
        affiliate_uuid: None,
        currency: "USD".to_string(),
        subtotal: 189_700,
        discount: 18_970,
        shipping: 0,
        tax: 13_658,
        add_on_fees: 0,
        total: 184_388,
        status: "pending".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
