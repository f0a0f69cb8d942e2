use clap::{ArgGroup, Args};
use jiff::Timestamp;
use storefront::discounts::parse_percent_basis_points;
use storefront_app::{
    database::{self, Db},
    domain::coupons::{
        CouponsService, PgCouponsService,
        data::NewCoupon,
        records::{CouponKind, CouponUuid},
    },
};

use crate::cli::{parse_minor_units, store_currency};

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("discount").required(true).args(["percentage", "amount"])))]
pub(crate) struct CreateCouponArgs {
    /// Coupon code, matched case-sensitively
    #[arg(long)]
    code: String,

    /// Percent off the subtotal, e.g. 10
    #[arg(long)]
    percentage: Option<String>,

    /// Fixed amount off in major units, e.g. 5.00
    #[arg(long)]
    amount: Option<String>,

    /// Minimum subtotal in major units before the coupon applies
    #[arg(long)]
    min_purchase: Option<String>,

    /// Cap on a percentage discount, in major units
    #[arg(long)]
    max_discount: Option<String>,

    /// Number of orders that may redeem the coupon
    #[arg(long)]
    usage_limit: Option<u32>,

    /// RFC 3339 timestamp after which the coupon is rejected
    #[arg(long)]
    expires_at: Option<Timestamp>,

    /// Create the coupon switched off
    #[arg(long)]
    inactive: bool,

    /// Store currency code
    #[arg(long, env = "STORE_CURRENCY", default_value = "USD")]
    currency: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateCouponArgs) -> Result<(), String> {
    let currency = store_currency(&args.currency)?;

    let (kind, value) = match (&args.percentage, &args.amount) {
        (Some(percentage), None) => {
            let basis_points = parse_percent_basis_points(percentage)
                .ok_or_else(|| format!("invalid percentage: {percentage}"))?;

            (CouponKind::Percentage, u64::from(basis_points))
        }
        (None, Some(amount)) => (CouponKind::Fixed, parse_minor_units(amount, currency)?),
        _ => return Err("exactly one of --percentage or --amount is required".to_string()),
    };

    let min_purchase = args
        .min_purchase
        .as_deref()
        .map(|amount| parse_minor_units(amount, currency))
        .transpose()?;

    let max_discount = args
        .max_discount
        .as_deref()
        .map(|amount| parse_minor_units(amount, currency))
        .transpose()?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgCouponsService::new(Db::new(pool));

    let coupon = service
        .create_coupon(NewCoupon {
            uuid: CouponUuid::new(),
            code: args.code,
            kind,
            value,
            min_purchase,
            max_discount,
            usage_limit: args.usage_limit,
            expires_at: args.expires_at,
            is_active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create coupon: {error}"))?;

    println!("coupon_uuid: {}", coupon.uuid);
    println!("coupon_code: {}", coupon.code);
    println!("kind: {}", coupon.kind);

    Ok(())
}
