//! Test Helpers

use decimal_percentage::Percentage;
use jiff::civil::date;
use quotation::{
    items::{ItemCategory, LineItem},
    quotes::new_customer_discount,
};
use rust_decimal::Decimal;

use crate::domain::quotes::{
    PersistenceError, QuotesService,
    data::NewQuote,
    models::QuoteNumber,
};

use super::TestContext;

pub(crate) fn keychain(quantity: i64, unit_price: Decimal) -> LineItem {
    LineItem::new(
        ItemCategory::Keychain,
        "Soft enamel, gold plating",
        "50mm",
        Decimal::from(quantity),
        unit_price,
    )
}

/// A complete quote for `client_name` with two lines and the new customer discount.
pub(crate) fn new_quote(client_name: &str) -> NewQuote {
    let items = vec![
        keychain(100, Decimal::new(125, 2)),
        LineItem::new(
            ItemCategory::Sticker,
            "Die cut, matte",
            "3in",
            Decimal::from(500),
            Decimal::new(15, 2),
        ),
    ];

    let discount = new_customer_discount();
    let shipping_cost = Decimal::new(4550, 2);

    NewQuote {
        client_name: client_name.to_string(),
        quote_date: date(2026, 10, 16),
        total_cost: quotation::quotes::total_cost(&items, &discount, shipping_cost)
            .expect("sample quote total should fit in a decimal"),
        items,
        shipping_cost,
        shipping_time: "4-7 working days".to_string(),
        shipping_method: "DHL Express".to_string(),
        remarks: Some("Sample before production".to_string()),
        discount,
    }
}

pub(crate) fn with_discount(quote: NewQuote, discount: Percentage) -> NewQuote {
    NewQuote { discount, ..quote }
}

pub(crate) async fn save_quote(
    ctx: &TestContext,
    client_name: &str,
) -> Result<QuoteNumber, PersistenceError> {
    ctx.quotes.save_quote(new_quote(client_name)).await
}
