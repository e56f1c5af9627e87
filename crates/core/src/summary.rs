//! Quote summary
//!
//! Renders a quote as the plain text that gets pasted into client conversations.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{discounts::percent_points, pricing::PricingError, quotes::QuoteDetails};

/// Plain-text rendering of a quote.
///
/// Every amount is worked out when the summary is created, so rendering itself cannot fail.
#[derive(Debug, Clone)]
pub struct QuoteSummary<'a> {
    details: &'a QuoteDetails,
    line_totals: Vec<Decimal>,
    discount_points: Decimal,
    discounted_subtotal: Decimal,
    total_cost: Decimal,
}

impl<'a> QuoteSummary<'a> {
    /// Create a summary for the given quote.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if a line or quote total exceeds the decimal range.
    pub fn new(details: &'a QuoteDetails) -> Result<Self, PricingError> {
        let line_totals = details
            .items
            .iter()
            .map(|item| item.total_price())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            details,
            line_totals,
            discount_points: percent_points(&details.discount).ok_or(PricingError::Overflow)?,
            discounted_subtotal: details.discounted_subtotal()?,
            total_cost: details.total_cost()?,
        })
    }

    /// Show `total_cost` as the quote's total instead of the one worked out from its items.
    ///
    /// Stored quotes keep the total they were saved with.
    #[must_use]
    pub fn with_total_cost(self, total_cost: Decimal) -> Self {
        Self { total_cost, ..self }
    }
}

impl fmt::Display for QuoteSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self.details;

        write!(f, "\n\n{}\n{}\n\n", details.client_name, details.quote_date)?;

        for (idx, (item, line_total)) in details.items.iter().zip(&self.line_totals).enumerate() {
            writeln!(f, "Item {}: {}", idx + 1, item.category)?;
            writeln!(f, "Specifications: {}", item.specification)?;
            writeln!(f, "Size: {}", item.size)?;
            writeln!(f, "Quantity: {}", item.quantity.normalize())?;
            writeln!(f, "Unit Price: ${}", format_amount(item.unit_price))?;
            writeln!(f, "Total Price: ${}", format_amount(*line_total))?;
        }

        writeln!(
            f,
            "New Customer (with {}% discount): ${}",
            self.discount_points,
            format_amount(self.discounted_subtotal)
        )?;
        writeln!(f, "Shipping Method: {}", details.shipping.method)?;
        writeln!(
            f,
            "Shipping cost ({}): ${}",
            details.shipping.time,
            format_amount(details.shipping.cost)
        )?;
        writeln!(f, "Total cost: ${}", format_amount(self.total_cost))?;
        writeln!(f, "Remarks: {}", details.remarks.as_deref().unwrap_or_default())
    }
}

/// Format a currency amount with two decimal places, rounding half away from zero.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    format!("{rounded:.2}")
}
