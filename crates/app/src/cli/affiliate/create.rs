use clap::Args;
use storefront::discounts::parse_percent_basis_points;
use storefront_app::{
    database::{self, Db},
    domain::affiliates::{
        AffiliatesService, PgAffiliatesService,
        data::NewAffiliate,
        records::AffiliateUuid,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateAffiliateArgs {
    /// Referral code, matched case-sensitively
    #[arg(long)]
    code: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Commission rate in percent, e.g. 7.5; the store default applies when omitted
    #[arg(long)]
    commission_rate: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAffiliateArgs) -> Result<(), String> {
    let commission_rate = args
        .commission_rate
        .as_deref()
        .map(|rate| {
            parse_percent_basis_points(rate)
                .ok_or_else(|| format!("invalid commission rate: {rate}"))
        })
        .transpose()?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAffiliatesService::new(Db::new(pool));

    let affiliate = service
        .create_affiliate(NewAffiliate {
            uuid: AffiliateUuid::new(),
            code: args.code,
            name: args.name,
            commission_rate,
        })
        .await
        .map_err(|error| format!("failed to create affiliate: {error}"))?;

    println!("affiliate_uuid: {}", affiliate.uuid);
    println!("affiliate_code: {}", affiliate.code);

    match affiliate.commission_rate {
        Some(rate) => println!("commission_rate_bps: {rate}"),
        None => println!("commission_rate_bps: default"),
    }

    Ok(())
}
