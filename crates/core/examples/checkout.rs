//! Checkout Breakdown Example
//!
//! Prices a two-line cart with a 10% coupon and prints the breakdown.

use anyhow::Result;
use decimal_percentage::Percentage;
use rusty_money::{Money, iso::USD};
use tabled::{Table, Tabled, settings::Style};

use storefront::{money::to_decimal_string, prelude::*};

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Line")]
    line: &'static str,

    #[tabled(rename = "Amount")]
    amount: String,
}

/// Checkout Breakdown Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let items = [
        LineItem::new("laptop", 1, Money::from_minor(119_900, USD)),
        LineItem::new("headphones", 2, Money::from_minor(34_900, USD)),
    ];

    let options = CartOptions {
        coupon: Some(CouponRule::percentage(Percentage::from(0.1))),
        delivery: DeliveryTier::Standard,
        add_ons: AddOns {
            insurance: true,
            gift_wrap: false,
        },
    };

    let config = PricingConfig::storefront_defaults();
    let calculation = calculate_cart_totals(&items, &options, &config)?;
    let commission = calculate_affiliate_commission(&calculation.total, None)?;

    let rows = [
        ("Subtotal", calculation.subtotal),
        ("Discount", calculation.discount),
        ("Shipping", calculation.shipping),
        ("Tax", calculation.tax),
        ("Add-ons", calculation.add_ons),
        ("Total", calculation.total),
        ("Affiliate commission", commission),
    ]
    .map(|(line, amount)| Row {
        line,
        amount: to_decimal_string(&amount),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    println!("{table}");

    Ok(())
}
