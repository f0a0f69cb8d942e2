//! Affiliates Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{try_get_optional_u32, u32_to_db},
    domain::affiliates::{
        data::NewAffiliate,
        records::{AffiliateRecord, AffiliateUuid},
    },
};

const CREATE_AFFILIATE_SQL: &str = include_str!("sql/create_affiliate.sql");
const GET_AFFILIATE_SQL: &str = include_str!("sql/get_affiliate.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAffiliatesRepository;

impl PgAffiliatesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_affiliate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        affiliate: &NewAffiliate,
    ) -> Result<AffiliateRecord, sqlx::Error> {
        query_as::<Postgres, AffiliateRecord>(CREATE_AFFILIATE_SQL)
            .bind(affiliate.uuid.into_uuid())
            .bind(&affiliate.code)
            .bind(&affiliate.name)
            .bind(
                affiliate
                    .commission_rate
                    .map(|rate| u32_to_db("commission_rate", rate))
                    .transpose()?,
            )
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_affiliate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<AffiliateRecord>, sqlx::Error> {
        query_as::<Postgres, AffiliateRecord>(GET_AFFILIATE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AffiliateRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AffiliateUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            commission_rate: try_get_optional_u32(row, "commission_rate")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
