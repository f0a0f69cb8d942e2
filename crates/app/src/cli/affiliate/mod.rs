use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct AffiliateCommand {
    #[command(subcommand)]
    command: AffiliateSubcommand,
}

#[derive(Debug, Subcommand)]
enum AffiliateSubcommand {
    /// Register a referring affiliate
    Create(create::CreateAffiliateArgs),
}

pub(crate) async fn run(command: AffiliateCommand) -> Result<(), String> {
    match command.command {
        AffiliateSubcommand::Create(args) => create::run(args).await,
    }
}
