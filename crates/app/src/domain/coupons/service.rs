//! Coupons service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::coupons::{
        data::NewCoupon,
        errors::CouponsServiceError,
        records::{CouponKind, CouponRecord},
        repository::PgCouponsRepository,
    },
};

/// 100% in basis points.
const MAX_PERCENTAGE_BASIS_POINTS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    repository: PgCouponsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError> {
        if coupon.code.trim().is_empty() {
            return Err(CouponsServiceError::MissingRequiredData);
        }

        if coupon.kind == CouponKind::Percentage && coupon.value > MAX_PERCENTAGE_BASIS_POINTS {
            return Err(CouponsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_coupon(&mut tx, &coupon).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let coupon = self
            .repository
            .get_coupon(&mut tx, code)
            .await?
            .ok_or(CouponsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(coupon)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Creates a coupon. Codes are unique and case-sensitive.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError>;

    /// Retrieve a coupon by its code.
    async fn get_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError>;
}
