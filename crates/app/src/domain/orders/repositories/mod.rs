//! Order Repositories

mod commissions;
mod items;
mod orders;

pub(crate) use commissions::PgAffiliateCommissionsRepository;
pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::{OrderInsert, PgOrdersRepository};
