//! Orders service.
//!
//! Pricing always reads the catalog and coupons inside the same transaction
//! that writes the order, so the persisted totals match what was calculated.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rusty_money::Money;
use sqlx::{Postgres, Transaction};
use storefront::{
    calculator::{CartOptions, OrderCalculation, calculate_cart_totals},
    commission::{calculate_affiliate_commission, default_commission_rate},
    config::PricingConfig,
    discounts::to_basis_points,
    items::LineItem,
};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        affiliates::{records::AffiliateRecord, repository::PgAffiliatesRepository},
        coupons::{records::CouponRecord, repository::PgCouponsRepository},
        orders::{
            data::{CartRequest, CreatedOrder, NewOrder, OrderDetails},
            errors::OrdersServiceError,
            records::{AffiliateCommissionRecord, Customer, OrderUuid},
            repositories::{
                OrderInsert, PgAffiliateCommissionsRepository, PgOrderItemsRepository,
                PgOrdersRepository,
            },
        },
        products::{records::ProductUuid, repository::PgProductsRepository},
    },
};

/// A priced cart and the rows it was priced from.
#[derive(Debug)]
struct PricedCart {
    lines: Vec<PricedLine>,
    coupon: Option<CouponRecord>,
    calculation: OrderCalculation<'static>,
}

impl PricedCart {
    /// The coupon, when it took money off the order.
    ///
    /// A coupon whose minimum purchase was not met is neither redeemed nor
    /// recorded on the order.
    fn redeemed_coupon(&self) -> Option<&CouponRecord> {
        self.coupon
            .as_ref()
            .filter(|_| self.calculation.discount.is_positive())
    }
}

#[derive(Debug, Clone, Copy)]
struct PricedLine {
    product: ProductUuid,
    quantity: u32,
    unit_price: u64,
}

/// Whether the coupon row is locked while pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CouponLock {
    Shared,
    ForUpdate,
}

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    pricing: PricingConfig<'static>,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    commissions: PgAffiliateCommissionsRepository,
    products: PgProductsRepository,
    coupons: PgCouponsRepository,
    affiliates: PgAffiliatesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, pricing: PricingConfig<'static>) -> Self {
        Self {
            db,
            pricing,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            commissions: PgAffiliateCommissionsRepository::new(),
            products: PgProductsRepository::new(),
            coupons: PgCouponsRepository::new(),
            affiliates: PgAffiliatesRepository::new(),
        }
    }

    async fn price_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &CartRequest,
        lock: CouponLock,
    ) -> Result<PricedCart, OrdersServiceError> {
        let requested: Vec<ProductUuid> = cart.items.iter().map(|line| line.product_uuid).collect();

        let prices: HashMap<ProductUuid, u64> = self
            .products
            .get_products(tx, &requested)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product.price))
            .collect();

        let lines = cart
            .items
            .iter()
            .map(|line| {
                prices
                    .get(&line.product_uuid)
                    .map(|unit_price| PricedLine {
                        product: line.product_uuid,
                        quantity: line.quantity,
                        unit_price: *unit_price,
                    })
                    .ok_or(OrdersServiceError::ProductNotFound(line.product_uuid))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let currency = self.pricing.currency;

        let line_items = lines
            .iter()
            .map(|line| {
                let minor =
                    i64::try_from(line.unit_price).map_err(|_err| OrdersServiceError::InvalidData)?;

                Ok(LineItem::new(
                    line.product,
                    line.quantity,
                    Money::from_minor(minor, currency),
                ))
            })
            .collect::<Result<Vec<_>, OrdersServiceError>>()?;

        let coupon = match cart.coupon_code.as_deref() {
            Some(code) => {
                let coupon = match lock {
                    CouponLock::Shared => self.coupons.get_coupon(tx, code).await?,
                    CouponLock::ForUpdate => self.coupons.lock_coupon(tx, code).await?,
                }
                .ok_or_else(|| OrdersServiceError::CouponNotFound(code.to_string()))?;

                coupon
                    .check_eligible(Timestamp::now())
                    .map_err(|reason| OrdersServiceError::CouponIneligible {
                        code: code.to_string(),
                        reason,
                    })?;

                Some(coupon)
            }
            None => None,
        };

        let rule = coupon
            .as_ref()
            .map(|coupon| coupon.rule(currency))
            .transpose()
            .map_err(|_err| OrdersServiceError::InvalidData)?;

        let options = CartOptions {
            coupon: rule,
            delivery: cart.delivery,
            add_ons: cart.add_ons,
        };

        let calculation = calculate_cart_totals(&line_items, &options, &self.pricing)?;

        Ok(PricedCart {
            lines,
            coupon,
            calculation,
        })
    }

    async fn resolve_affiliate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: Option<&str>,
    ) -> Result<Option<AffiliateRecord>, OrdersServiceError> {
        let Some(code) = code else {
            return Ok(None);
        };

        let affiliate = self.affiliates.get_affiliate(tx, code).await?;

        if affiliate.is_none() {
            warn!(affiliate_code = code, "ignoring unknown affiliate code");
        }

        Ok(affiliate)
    }

    async fn record_commission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        affiliate: &AffiliateRecord,
        order: OrderUuid,
        calculation: &OrderCalculation<'static>,
    ) -> Result<AffiliateCommissionRecord, OrdersServiceError> {
        let rate = affiliate.rate().unwrap_or_else(default_commission_rate);

        let commission = calculate_affiliate_commission(&calculation.total, Some(rate))?;

        let basis_points = to_basis_points(&rate).ok_or(OrdersServiceError::InvalidData)?;

        let amount = u64::try_from(commission.to_minor_units())
            .map_err(|_err| OrdersServiceError::InvalidData)?;

        let record = self
            .commissions
            .create_commission(tx, affiliate.uuid, order, basis_points, amount)
            .await?;

        Ok(record)
    }
}

fn validate_order(order: &NewOrder) -> Result<(), OrdersServiceError> {
    if let Customer::Guest { email } = &order.customer
        && !email.contains('@')
    {
        return Err(OrdersServiceError::MissingRequiredData);
    }

    if !order.shipping_address.is_complete() {
        return Err(OrdersServiceError::MissingRequiredData);
    }

    Ok(())
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn calculate_cart(
        &self,
        cart: CartRequest,
    ) -> Result<OrderCalculation<'static>, OrdersServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let priced = self.price_cart(&mut tx, &cart, CouponLock::Shared).await?;

        tx.commit().await?;

        Ok(priced.calculation)
    }

    async fn create_order_with_calculations(
        &self,
        order: NewOrder,
    ) -> Result<CreatedOrder, OrdersServiceError> {
        validate_order(&order)?;

        let mut tx = self.db.begin().await?;

        let priced = self
            .price_cart(&mut tx, &order.cart, CouponLock::ForUpdate)
            .await?;

        let affiliate = self
            .resolve_affiliate(&mut tx, order.affiliate_code.as_deref())
            .await?;

        let coupon = priced.redeemed_coupon();

        let record = self
            .orders
            .create_order(
                &mut tx,
                OrderInsert {
                    uuid: order.uuid,
                    customer: &order.customer,
                    shipping_address: &order.shipping_address,
                    payment_method: order.payment_method,
                    delivery: order.cart.delivery,
                    add_ons: order.cart.add_ons,
                    coupon_code: coupon.map(|coupon| coupon.code.as_str()),
                    affiliate: affiliate.as_ref().map(|affiliate| affiliate.uuid),
                    calculation: &priced.calculation,
                },
            )
            .await?;

        let mut items = Vec::with_capacity(priced.lines.len());

        for (position, line) in (0_u32..).zip(&priced.lines) {
            let item = self
                .items
                .create_order_item(
                    &mut tx,
                    record.uuid,
                    position,
                    line.product,
                    line.quantity,
                    line.unit_price,
                )
                .await?;

            items.push(item);
        }

        if let Some(coupon) = coupon {
            self.coupons.increment_usage(&mut tx, coupon.uuid).await?;
        }

        let commission = match &affiliate {
            Some(affiliate) => Some(
                self.record_commission(&mut tx, affiliate, record.uuid, &priced.calculation)
                    .await?,
            ),
            None => None,
        };

        tx.commit().await?;

        info!(
            order_uuid = %record.uuid,
            total = record.total,
            items = items.len(),
            coupon = record.coupon_code.as_deref(),
            "order created"
        );

        Ok(CreatedOrder {
            order: record,
            items,
            calculation: priced.calculation,
            commission,
        })
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let record = self.orders.get_order(&mut tx, order).await?;
        let items = self.items.list_order_items(&mut tx, order).await?;
        let commission = self.commissions.get_commission(&mut tx, order).await?;

        tx.commit().await?;

        Ok(OrderDetails {
            order: record,
            items,
            commission,
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Price a cart against the current catalog and coupon without writing
    /// anything.
    async fn calculate_cart(
        &self,
        cart: CartRequest,
    ) -> Result<OrderCalculation<'static>, OrdersServiceError>;

    /// Price and place an order in a single transaction.
    ///
    /// Products are resolved against the catalog and their current prices are
    /// snapshotted onto the order items. A coupon, when given, must exist and be
    /// eligible; its usage count is incremented. An affiliate code that
    /// resolves earns the affiliate a commission on the order total; an unknown
    /// affiliate code is ignored. Nothing is written unless every step succeeds.
    async fn create_order_with_calculations(
        &self,
        order: NewOrder,
    ) -> Result<CreatedOrder, OrdersServiceError>;

    /// Retrieve an order with its items and commission.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderDetails, OrdersServiceError>;
}
