//! Affiliates service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::affiliates::{
        data::NewAffiliate, errors::AffiliatesServiceError, records::AffiliateRecord,
        repository::PgAffiliatesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAffiliatesService {
    db: Db,
    repository: PgAffiliatesRepository,
}

impl PgAffiliatesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAffiliatesRepository::new(),
        }
    }
}

#[async_trait]
impl AffiliatesService for PgAffiliatesService {
    async fn create_affiliate(
        &self,
        affiliate: NewAffiliate,
    ) -> Result<AffiliateRecord, AffiliatesServiceError> {
        if affiliate.code.trim().is_empty() || affiliate.name.trim().is_empty() {
            return Err(AffiliatesServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_affiliate(&mut tx, &affiliate).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_affiliate(&self, code: &str) -> Result<AffiliateRecord, AffiliatesServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let affiliate = self
            .repository
            .get_affiliate(&mut tx, code)
            .await?
            .ok_or(AffiliatesServiceError::NotFound)?;

        tx.commit().await?;

        Ok(affiliate)
    }
}

#[automock]
#[async_trait]
pub trait AffiliatesService: Send + Sync {
    /// Registers a referring affiliate.
    async fn create_affiliate(
        &self,
        affiliate: NewAffiliate,
    ) -> Result<AffiliateRecord, AffiliatesServiceError>;

    /// Retrieve an affiliate by referral code.
    async fn get_affiliate(&self, code: &str) -> Result<AffiliateRecord, AffiliatesServiceError>;
}
