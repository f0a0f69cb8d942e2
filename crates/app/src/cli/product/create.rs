use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::products::{
        PgProductsService, ProductsService,
        data::NewProduct,
        records::ProductUuid,
    },
};
use uuid::Uuid;

use crate::cli::{parse_minor_units, store_currency};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price in major units, e.g. 1199.00
    #[arg(long)]
    price: String,

    /// Store currency code
    #[arg(long, env = "STORE_CURRENCY", default_value = "USD")]
    currency: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let currency = store_currency(&args.currency)?;
    let price = parse_minor_units(&args.price, currency)?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProductsService::new(Db::new(pool));

    let product = service
        .create_product(NewProduct {
            uuid: args
                .product_uuid
                .map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: args.name,
            price,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_name: {}", product.name);
    println!("price: {} {}", args.price, currency.iso_alpha_code);

    Ok(())
}
