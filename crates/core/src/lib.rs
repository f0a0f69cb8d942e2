//! Storefront
//!
//! Order pricing for the storefront: line items, coupon rules, delivery tiers,
//! add-ons, tax and affiliate commission. Everything here is a pure function of
//! its inputs; catalog lookups and persistence live in `storefront-app`.

pub mod calculator;
pub mod commission;
pub mod config;
pub mod coupons;
pub mod delivery;
pub mod discounts;
pub mod errors;
pub mod items;
pub mod money;
pub mod prelude;
