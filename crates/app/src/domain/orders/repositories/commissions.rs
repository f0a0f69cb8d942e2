//! Affiliate Commissions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{amount_to_db, try_get_amount, try_get_u32, u32_to_db},
    domain::{
        affiliates::records::AffiliateUuid,
        orders::records::{AffiliateCommissionRecord, AffiliateCommissionUuid, OrderUuid},
    },
};

const CREATE_AFFILIATE_COMMISSION_SQL: &str = include_str!("../sql/create_affiliate_commission.sql");
const GET_AFFILIATE_COMMISSION_SQL: &str = include_str!("../sql/get_affiliate_commission.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAffiliateCommissionsRepository;

impl PgAffiliateCommissionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_commission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        affiliate: AffiliateUuid,
        order: OrderUuid,
        commission_rate: u32,
        amount: u64,
    ) -> Result<AffiliateCommissionRecord, sqlx::Error> {
        query_as::<Postgres, AffiliateCommissionRecord>(CREATE_AFFILIATE_COMMISSION_SQL)
            .bind(AffiliateCommissionUuid::new().into_uuid())
            .bind(affiliate.into_uuid())
            .bind(order.into_uuid())
            .bind(u32_to_db("commission_rate", commission_rate)?)
            .bind(amount_to_db("amount", amount)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_commission(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<AffiliateCommissionRecord>, sqlx::Error> {
        query_as::<Postgres, AffiliateCommissionRecord>(GET_AFFILIATE_COMMISSION_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AffiliateCommissionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AffiliateCommissionUuid::from_uuid(row.try_get("uuid")?),
            affiliate_uuid: AffiliateUuid::from_uuid(row.try_get("affiliate_uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            commission_rate: try_get_u32(row, "commission_rate")?,
            amount: try_get_amount(row, "amount")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
