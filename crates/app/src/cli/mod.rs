use clap::{Parser, Subcommand};
use quotation_app::{config::LoggingConfig, observability::init_subscriber};

mod price;
mod quote;

#[derive(Debug, Parser)]
#[command(name = "quotation", about = "Price products and keep client quotes", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Work out the cost and sale price of a product
    Price(price::PriceArgs),

    /// Preview, save and look up client quotes
    Quote(quote::QuoteCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        init_subscriber(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Price(args) => price::run(&args),
            Commands::Quote(command) => quote::run(command).await,
        }
    }
}
