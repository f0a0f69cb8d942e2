use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct CouponCommand {
    #[command(subcommand)]
    command: CouponSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponSubcommand {
    /// Create a percentage or fixed-amount coupon
    Create(create::CreateCouponArgs),
}

pub(crate) async fn run(command: CouponCommand) -> Result<(), String> {
    match command.command {
        CouponSubcommand::Create(args) => create::run(args).await,
    }
}
