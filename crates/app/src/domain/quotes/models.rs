//! Quote Models

use decimal_percentage::Percentage;
use jiff::{Timestamp, civil::Date};
use quotation::{
    items::LineItem,
    quotes::{QuoteDetails, Shipping},
};
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Quote Number
pub type QuoteNumber = TypedUuid<Quote>;

/// Quote Model
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub quote_number: QuoteNumber,
    pub client_name: String,
    pub quote_date: Date,
    pub items: Vec<LineItem>,
    pub shipping_cost: Decimal,
    pub total_cost: Decimal,
    pub shipping_time: String,
    pub shipping_method: String,
    pub remarks: Option<String>,
    pub discount: Percentage,
    pub created_at: Timestamp,
}

impl Quote {
    /// The client-facing contents of this quote.
    #[must_use]
    pub fn details(&self) -> QuoteDetails {
        QuoteDetails {
            client_name: self.client_name.clone(),
            quote_date: self.quote_date,
            items: self.items.clone(),
            shipping: Shipping {
                method: self.shipping_method.clone(),
                cost: self.shipping_cost,
                time: self.shipping_time.clone(),
            },
            remarks: self.remarks.clone(),
            discount: self.discount,
        }
    }
}
