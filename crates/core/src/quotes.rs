//! Quotes
//!
//! Quote-level totals. A saved quote's total cost is the discounted item subtotal plus
//! shipping; callers compute it here before handing the quote to storage.

use decimal_percentage::Percentage;
use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::{discounts::apply_discount, items::LineItem, pricing::PricingError};

/// Discount rate offered to new customers (10%).
pub const NEW_CUSTOMER_DISCOUNT: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// The new customer discount as a [`Percentage`].
pub fn new_customer_discount() -> Percentage {
    Percentage::from(NEW_CUSTOMER_DISCOUNT)
}

/// Shipping terms for a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct Shipping {
    /// Carrier or service, e.g. "DHL Express"
    pub method: String,

    /// Shipping cost in the quote currency
    pub cost: Decimal,

    /// Transit time, e.g. "4-7 working days"
    pub time: String,
}

/// Everything a client-facing quote is made of.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteDetails {
    /// Client the quote is addressed to
    pub client_name: String,

    /// Date of the quote
    pub quote_date: Date,

    /// Quoted lines, in display order
    pub items: Vec<LineItem>,

    /// Shipping terms
    pub shipping: Shipping,

    /// Optional free-text remarks
    pub remarks: Option<String>,

    /// Discount applied to the item subtotal
    pub discount: Percentage,
}

impl QuoteDetails {
    /// Sum of all line totals before discount.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the sum exceeds the decimal range.
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        subtotal(&self.items)
    }

    /// Item subtotal after the discount.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if any step exceeds the decimal range.
    pub fn discounted_subtotal(&self) -> Result<Decimal, PricingError> {
        discounted_subtotal(&self.items, &self.discount)
    }

    /// Discounted item subtotal plus shipping.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if any step exceeds the decimal range.
    pub fn total_cost(&self) -> Result<Decimal, PricingError> {
        total_cost(&self.items, &self.discount, self.shipping.cost)
    }
}

/// Sum of all line totals.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if a line total or the sum exceeds the decimal range.
pub fn subtotal(items: &[LineItem]) -> Result<Decimal, PricingError> {
    items.iter().try_fold(Decimal::ZERO, |sum, item| {
        sum.checked_add(item.total_price()?)
            .ok_or(PricingError::Overflow)
    })
}

/// Line totals after taking `discount` off.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any step exceeds the decimal range.
pub fn discounted_subtotal(
    items: &[LineItem],
    discount: &Percentage,
) -> Result<Decimal, PricingError> {
    apply_discount(subtotal(items)?, discount).ok_or(PricingError::Overflow)
}

/// Total cost of a quote: `subtotal * (1 - discount) + shipping_cost`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any step exceeds the decimal range.
pub fn total_cost(
    items: &[LineItem],
    discount: &Percentage,
    shipping_cost: Decimal,
) -> Result<Decimal, PricingError> {
    discounted_subtotal(items, discount)?
        .checked_add(shipping_cost)
        .ok_or(PricingError::Overflow)
}
