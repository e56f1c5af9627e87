//! Quotation
//!
//! Quote pricing for small-batch merchandise: a deterministic cost/price engine (tariffs,
//! promotions, profit margin, insurance fee and currency conversion), line items, quote totals
//! and the plain-text quote summary handed to clients.

pub mod discounts;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod quotes;
pub mod summary;
