//! Affiliates Data

use crate::domain::affiliates::records::AffiliateUuid;

/// New Affiliate Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAffiliate {
    pub uuid: AffiliateUuid,
    pub code: String,
    pub name: String,
    pub commission_rate: Option<u32>,
}
