//! Coupons Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{
        amount_to_db, try_get_amount, try_get_optional_amount, try_get_optional_u32, try_get_u32,
        u32_to_db,
    },
    domain::coupons::{
        data::NewCoupon,
        records::{CouponKind, CouponRecord, CouponUuid},
    },
};

const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const GET_COUPON_SQL: &str = include_str!("sql/get_coupon.sql");
const LOCK_COUPON_SQL: &str = include_str!("sql/lock_coupon.sql");
const INCREMENT_COUPON_USAGE_SQL: &str = include_str!("sql/increment_coupon_usage.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: &NewCoupon,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(CREATE_COUPON_SQL)
            .bind(coupon.uuid.into_uuid())
            .bind(&coupon.code)
            .bind(coupon.kind.as_str())
            .bind(amount_to_db("value", coupon.value)?)
            .bind(
                coupon
                    .min_purchase
                    .map(|amount| amount_to_db("min_purchase", amount))
                    .transpose()?,
            )
            .bind(
                coupon
                    .max_discount
                    .map(|amount| amount_to_db("max_discount", amount))
                    .transpose()?,
            )
            .bind(
                coupon
                    .usage_limit
                    .map(|limit| u32_to_db("usage_limit", limit))
                    .transpose()?,
            )
            .bind(coupon.expires_at.map(SqlxTimestamp::from))
            .bind(coupon.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(GET_COUPON_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch a coupon and hold its row lock until the transaction ends.
    pub(crate) async fn lock_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LOCK_COUPON_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn increment_usage(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_COUPON_USAGE_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            kind: kind
                .parse::<CouponKind>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "kind".to_string(),
                    source: Box::new(e),
                })?,
            value: try_get_amount(row, "value")?,
            min_purchase: try_get_optional_amount(row, "min_purchase")?,
            max_discount: try_get_optional_amount(row, "max_discount")?,
            usage_limit: try_get_optional_u32(row, "usage_limit")?,
            used_count: try_get_u32(row, "used_count")?,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
