//! Affiliate Records

use decimal_percentage::Percentage;
use jiff::Timestamp;
use storefront::discounts::from_basis_points;

use crate::uuids::TypedUuid;

/// Affiliate UUID
pub type AffiliateUuid = TypedUuid<AffiliateRecord>;

/// Affiliate Record
///
/// `commission_rate` is in basis points; `None` falls back to the store
/// default when commission is calculated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateRecord {
    pub uuid: AffiliateUuid,
    pub code: String,
    pub name: String,
    pub commission_rate: Option<u32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AffiliateRecord {
    /// Commission rate on record, if any.
    #[must_use]
    pub fn rate(&self) -> Option<Percentage> {
        self.commission_rate.map(from_basis_points)
    }
}
