//! Quote Example
//!
//! Prices a batch of keychains and prints the summary a client would receive.

use anyhow::Result;
use decimal_percentage::Percentage;
use jiff::civil::date;
use rust_decimal::Decimal;

use quotation::prelude::*;

#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let quantity = Decimal::from(500);

    let breakdown = compute_quote(
        Decimal::new(420, 2),
        Percentage::from(Decimal::new(5, 2)),
        Percentage::from(Decimal::new(25, 2)),
        Decimal::new(35, 2),
        quantity,
    )?;

    breakdown.write_to(std::io::stdout())?;

    let unit_price = breakdown.unit_sale_price_usd()?;

    println!("Unit sale price (USD): {unit_price}");

    let details = QuoteDetails {
        client_name: "Alice".to_string(),
        quote_date: date(2026, 10, 16),
        items: vec![LineItem::new(
            ItemCategory::Keychain,
            "Soft enamel, gold plating",
            "50mm",
            quantity,
            Decimal::new(125, 2),
        )],
        shipping: Shipping {
            method: "DHL Express".to_string(),
            cost: Decimal::new(4550, 2),
            time: "4-7 working days".to_string(),
        },
        remarks: None,
        discount: new_customer_discount(),
    };

    println!("{}", QuoteSummary::new(&details)?);

    Ok(())
}
