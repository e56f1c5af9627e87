//! Quotation prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    discounts::{DiscountError, fraction, parse_percentage, percent_points},
    items::{ItemCategory, ItemError, LineItem},
    pricing::{
        CNY_PER_USD, INSURANCE_FEE_RATE, PROFIT_MARGIN, PriceBreakdown, PricingError,
        compute_quote,
    },
    quotes::{NEW_CUSTOMER_DISCOUNT, QuoteDetails, Shipping, new_customer_discount},
    summary::{QuoteSummary, format_amount},
};
