//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use storefront::{
    calculator::OrderCalculation,
    delivery::{AddOns, DeliveryTier},
};
use uuid::Uuid;

use crate::{
    database::try_get_amount,
    domain::{
        affiliates::records::AffiliateUuid,
        orders::records::{Customer, OrderRecord, OrderUuid, PaymentMethod, ShippingAddress},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");

/// Columns written when an order is placed.
#[derive(Debug)]
pub(crate) struct OrderInsert<'a> {
    pub uuid: OrderUuid,
    pub customer: &'a Customer,
    pub shipping_address: &'a ShippingAddress,
    pub payment_method: PaymentMethod,
    pub delivery: DeliveryTier,
    pub add_ons: AddOns,
    pub coupon_code: Option<&'a str>,
    pub affiliate: Option<AffiliateUuid>,
    pub calculation: &'a OrderCalculation<'a>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderInsert<'_>,
    ) -> Result<OrderRecord, sqlx::Error> {
        let (user_uuid, guest_email) = match order.customer {
            Customer::User(uuid) => (Some(*uuid), None),
            Customer::Guest { email } => (None, Some(email.as_str())),
        };

        let address = order.shipping_address;
        let calculation = order.calculation;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(user_uuid)
            .bind(guest_email)
            .bind(&address.name)
            .bind(&address.line1)
            .bind(address.line2.as_deref())
            .bind(&address.city)
            .bind(&address.postcode)
            .bind(&address.country)
            .bind(order.payment_method.as_str())
            .bind(order.delivery.as_str())
            .bind(order.add_ons.insurance)
            .bind(order.add_ons.gift_wrap)
            .bind(order.coupon_code)
            .bind(order.affiliate.map(AffiliateUuid::into_uuid))
            .bind(calculation.total.currency().iso_alpha_code)
            .bind(calculation.subtotal.to_minor_units())
            .bind(calculation.discount.to_minor_units())
            .bind(calculation.shipping.to_minor_units())
            .bind(calculation.tax.to_minor_units())
            .bind(calculation.add_ons.to_minor_units())
            .bind(calculation.total.to_minor_units())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

fn decode_error(col: &str, error: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(error),
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let user_uuid: Option<Uuid> = row.try_get("user_uuid")?;
        let guest_email: Option<String> = row.try_get("guest_email")?;

        let customer = match (user_uuid, guest_email) {
            (Some(uuid), _) => Customer::User(uuid),
            (None, Some(email)) => Customer::Guest { email },
            (None, None) => {
                return Err(sqlx::Error::ColumnNotFound("user_uuid".to_string()));
            }
        };

        let payment_method: String = row.try_get("payment_method")?;
        let delivery_tier: String = row.try_get("delivery_tier")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer,
            shipping_address: ShippingAddress {
                name: row.try_get("shipping_name")?,
                line1: row.try_get("shipping_line1")?,
                line2: row.try_get("shipping_line2")?,
                city: row.try_get("shipping_city")?,
                postcode: row.try_get("shipping_postcode")?,
                country: row.try_get("shipping_country")?,
            },
            payment_method: payment_method
                .parse()
                .map_err(|e| decode_error("payment_method", e))?,
            delivery: delivery_tier
                .parse()
                .map_err(|e| decode_error("delivery_tier", e))?,
            add_ons: AddOns {
                insurance: row.try_get("insurance")?,
                gift_wrap: row.try_get("gift_wrap")?,
            },
            coupon_code: row.try_get("coupon_code")?,
            affiliate_uuid: row
                .try_get::<Option<Uuid>, _>("affiliate_uuid")?
                .map(AffiliateUuid::from_uuid),
            currency: row.try_get("currency")?,
            subtotal: try_get_amount(row, "subtotal")?,
            discount: try_get_amount(row, "discount")?,
            shipping: try_get_amount(row, "shipping")?,
            tax: try_get_amount(row, "tax")?,
            add_on_fees: try_get_amount(row, "add_ons")?,
            total: try_get_amount(row, "total")?,
            status: row.try_get("status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
