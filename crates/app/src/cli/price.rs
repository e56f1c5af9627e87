use std::{
    fmt::Display,
    io::{self, Write},
};

use clap::Args;
use decimal_percentage::Percentage;
use quotation::pricing::{PriceBreakdown, PricingError, compute_quote};
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct PriceArgs {
    /// Unit cost price (CNY)
    #[arg(long)]
    cost_price: Decimal,

    /// Supplier promotion, in percent
    #[arg(long, default_value_t = Decimal::ZERO)]
    promotion: Decimal,

    /// Tariff rate, in percent
    #[arg(long, default_value_t = Decimal::ZERO)]
    tariff: Decimal,

    /// Accessories cost per unit (CNY)
    #[arg(long, default_value_t = Decimal::ZERO)]
    accessories_cost: Decimal,

    /// Number of units
    #[arg(long)]
    quantity: Decimal,
}

impl PriceArgs {
    fn breakdown(&self) -> Result<PriceBreakdown, PricingError> {
        compute_quote(
            self.cost_price,
            rate_from_percent(self.promotion),
            rate_from_percent(self.tariff),
            self.accessories_cost,
            self.quantity,
        )
    }
}

fn rate_from_percent(percent: Decimal) -> Percentage {
    Percentage::from(percent / Decimal::ONE_HUNDRED)
}

pub(crate) fn run(args: &PriceArgs) -> Result<(), String> {
    write_price(args, io::stdout().lock())
}

fn write_price(args: &PriceArgs, mut out: impl Write) -> Result<(), String> {
    let breakdown = args
        .breakdown()
        .map_err(|error| format!("failed to compute price: {error}"))?;

    let sale_price = breakdown
        .sale_price_usd()
        .map_err(|error| format!("failed to convert sale price: {error}"))?;

    let unit_sale_price = breakdown
        .unit_sale_price_usd()
        .map_err(|error| format!("failed to convert unit sale price: {error}"))?;

    write_report(&breakdown, &sale_price, &unit_sale_price, &mut out)
        .map_err(|error| format!("failed to write price breakdown: {error}"))
}

fn write_report(
    breakdown: &PriceBreakdown,
    sale_price: &impl Display,
    unit_sale_price: &impl Display,
    out: &mut impl Write,
) -> io::Result<()> {
    breakdown.write_to(&mut *out)?;

    writeln!(out, "Sale price (USD): {sale_price}")?;
    writeln!(out, "Unit sale price (USD): {unit_sale_price}")
}
