//! Quotes Data

use decimal_percentage::Percentage;
use jiff::civil::Date;
use quotation::{items::LineItem, pricing::PricingError, quotes::QuoteDetails};
use rust_decimal::Decimal;

/// New Quote Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuote {
    pub client_name: String,
    pub quote_date: Date,
    pub items: Vec<LineItem>,
    pub shipping_cost: Decimal,
    pub total_cost: Decimal,
    pub shipping_time: String,
    pub shipping_method: String,
    pub remarks: Option<String>,
    pub discount: Percentage,
}

impl NewQuote {
    /// Build the record for a quote, with the total cost worked out from its items,
    /// discount and shipping.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total cost exceeds the decimal range.
    pub fn from_details(details: QuoteDetails) -> Result<Self, PricingError> {
        let total_cost = details.total_cost()?;

        Ok(Self {
            client_name: details.client_name,
            quote_date: details.quote_date,
            items: details.items,
            shipping_cost: details.shipping.cost,
            total_cost,
            shipping_time: details.shipping.time,
            shipping_method: details.shipping.method,
            remarks: details.remarks,
            discount: details.discount,
        })
    }
}
