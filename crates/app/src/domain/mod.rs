//! Quotation Domain Concerns

pub mod quotes;
