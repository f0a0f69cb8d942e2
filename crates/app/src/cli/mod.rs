use clap::{Parser, Subcommand};
use rusty_money::{Findable, iso::Currency};
use storefront::money::parse_amount;

mod affiliate;
mod coupon;
mod db;
mod product;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Product(product::ProductCommand),
    Coupon(coupon::CouponCommand),
    Affiliate(affiliate::AffiliateCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Coupon(command) => coupon::run(command).await,
            Commands::Affiliate(command) => affiliate::run(command).await,
        }
    }
}

/// Resolve an ISO 4217 code.
fn store_currency(code: &str) -> Result<&'static Currency, String> {
    Currency::find(code).ok_or_else(|| format!("unknown currency: {code}"))
}

/// Parse a major-unit amount (`"9.99"`) into non-negative minor units.
fn parse_minor_units(amount: &str, currency: &'static Currency) -> Result<u64, String> {
    let money = parse_amount(amount, currency).map_err(|error| error.to_string())?;

    u64::try_from(money.to_minor_units()).map_err(|_err| format!("amount {amount} is negative"))
}
