//! Storefront Domain Concerns

pub mod affiliates;
pub mod coupons;
pub mod orders;
pub mod products;
