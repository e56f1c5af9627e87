use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Subcommand};
use jiff::Zoned;
use quotation::{pricing::PricingError, summary::QuoteSummary};
use quotation_app::{
    config::DatabaseConfig,
    context::AppContext,
    domain::quotes::{
        QuotesService,
        data::NewQuote,
        models::{Quote, QuoteNumber},
    },
};

mod file;

use file::QuoteFile;

#[derive(Debug, Args)]
pub(crate) struct QuoteCommand {
    #[command(subcommand)]
    command: QuoteSubcommand,
}

#[derive(Debug, Subcommand)]
enum QuoteSubcommand {
    /// Print the plain-text summary of a quote file
    Preview(PreviewArgs),

    /// Save a quote file and print its quote number
    Save(SaveArgs),

    /// Show a stored quote
    Show(ShowArgs),

    /// List stored quotes for a client
    List(ListArgs),
}

#[derive(Debug, Args)]
struct PreviewArgs {
    /// Quote file (YAML)
    #[arg(long)]
    file: PathBuf,
}

#[derive(Debug, Args)]
struct SaveArgs {
    /// Quote file (YAML)
    #[arg(long)]
    file: PathBuf,

    #[command(flatten)]
    database: DatabaseConfig,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Quote number
    quote_number: QuoteNumber,

    #[command(flatten)]
    database: DatabaseConfig,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Client name (exact match)
    #[arg(long)]
    client: String,

    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(command: QuoteCommand) -> Result<(), String> {
    let mut out = io::stdout();

    match command.command {
        QuoteSubcommand::Preview(args) => {
            let details = QuoteFile::load(&args.file)?.into_details(Zoned::now().date())?;
            let summary = QuoteSummary::new(&details).map_err(pricing_error)?;

            write!(out, "{summary}").map_err(write_error)
        }
        QuoteSubcommand::Save(args) => {
            let details = QuoteFile::load(&args.file)?.into_details(Zoned::now().date())?;
            let quote = NewQuote::from_details(details).map_err(pricing_error)?;
            let ctx = open(&args.database).await?;

            save(ctx.quotes.as_ref(), quote, &mut out).await
        }
        QuoteSubcommand::Show(args) => {
            let ctx = open(&args.database).await?;

            show(ctx.quotes.as_ref(), args.quote_number, &mut out).await
        }
        QuoteSubcommand::List(args) => {
            let ctx = open(&args.database).await?;

            list(ctx.quotes.as_ref(), &args.client, &mut out).await
        }
    }
}

async fn open(config: &DatabaseConfig) -> Result<AppContext, String> {
    AppContext::from_database_url(&config.database_url)
        .await
        .map_err(|error| format!("failed to open quote database: {error}"))
}

fn write_error(error: io::Error) -> String {
    format!("failed to write output: {error}")
}

fn pricing_error(error: PricingError) -> String {
    format!("failed to price quote: {error}")
}

async fn save(
    quotes: &dyn QuotesService,
    quote: NewQuote,
    out: &mut impl Write,
) -> Result<(), String> {
    let quote_number = quotes
        .save_quote(quote)
        .await
        .map_err(|error| format!("failed to save quote: {error}"))?;

    writeln!(out, "quote_number: {quote_number}").map_err(write_error)
}

async fn show(
    quotes: &dyn QuotesService,
    quote_number: QuoteNumber,
    out: &mut impl Write,
) -> Result<(), String> {
    let quote = quotes
        .find_quote(quote_number)
        .await
        .map_err(|error| format!("failed to find quote: {error}"))?;

    match quote {
        Some(quote) => write_quote(&quote, out),
        None => writeln!(out, "no quote found with number {quote_number}").map_err(write_error),
    }
}

async fn list(quotes: &dyn QuotesService, client: &str, out: &mut impl Write) -> Result<(), String> {
    let quotes = quotes
        .find_quotes_by_client(client)
        .await
        .map_err(|error| format!("failed to list quotes: {error}"))?;

    if quotes.is_empty() {
        return writeln!(out, "no quotes found for client {client}").map_err(write_error);
    }

    for quote in &quotes {
        write_quote(quote, out)?;
        writeln!(out).map_err(write_error)?;
    }

    Ok(())
}

/// Print a stored quote. The total shown is the one saved with it, not a recomputation.
fn write_quote(quote: &Quote, out: &mut impl Write) -> Result<(), String> {
    let details = quote.details();
    let summary = QuoteSummary::new(&details)
        .map_err(pricing_error)?
        .with_total_cost(quote.total_cost);

    writeln!(out, "quote_number: {}", quote.quote_number).map_err(write_error)?;
    writeln!(out, "created_at: {}", quote.created_at).map_err(write_error)?;
    write!(out, "{summary}").map_err(write_error)
}
