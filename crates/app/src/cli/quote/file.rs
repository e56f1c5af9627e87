//! Quote input files
//!
//! A quote is written as YAML:
//!
//! ```yaml
//! client_name: Alice
//! quote_date: 2026-10-16   # optional, defaults to today
//! discount: 10%            # optional, defaults to the new customer discount
//! shipping:
//!   method: DHL Express
//!   cost: 45.50
//!   time: 4-7 working days
//! remarks: Sample before production
//! items:
//!   - category: keychain
//!     specification: Soft enamel, gold plating
//!     size: 50mm
//!     quantity: 100
//!     unit_price: 1.25
//! ```

use std::{fs, path::Path};

use decimal_percentage::Percentage;
use jiff::civil::Date;
use quotation::{
    discounts::parse_percentage,
    items::LineItem,
    quotes::{QuoteDetails, Shipping, new_customer_discount},
};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Shipping time used when the file does not give one.
const DEFAULT_SHIPPING_TIME: &str = "4-7 working days";

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteFile {
    client_name: String,

    #[serde(default)]
    quote_date: Option<Date>,

    #[serde(default)]
    discount: Option<RawDiscount>,

    #[serde(default)]
    shipping: ShippingFile,

    #[serde(default)]
    remarks: Option<String>,

    #[serde(default)]
    items: Vec<LineItem>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDiscount {
    Text(String),
    Rate(Decimal),
}

#[derive(Debug, Deserialize)]
struct ShippingFile {
    #[serde(default)]
    method: String,

    #[serde(default)]
    cost: Decimal,

    #[serde(default = "default_shipping_time")]
    time: String,
}

impl Default for ShippingFile {
    fn default() -> Self {
        Self {
            method: String::new(),
            cost: Decimal::ZERO,
            time: default_shipping_time(),
        }
    }
}

fn default_shipping_time() -> String {
    DEFAULT_SHIPPING_TIME.to_string()
}

impl QuoteFile {
    /// Read and parse a quote file.
    pub(crate) fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|error| format!("failed to read {}: {error}", path.display()))?;

        Self::parse(&contents).map_err(|error| format!("invalid quote file {}: {error}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self, String> {
        serde_norway::from_str(contents).map_err(|error| error.to_string())
    }

    /// Turn the file into quote details, dating undated quotes `today`.
    pub(crate) fn into_details(self, today: Date) -> Result<QuoteDetails, String> {
        let discount = match self.discount {
            None => new_customer_discount(),
            Some(RawDiscount::Text(text)) => {
                parse_percentage(&text).map_err(|error| error.to_string())?
            }
            Some(RawDiscount::Rate(rate)) => Percentage::from(rate),
        };

        Ok(QuoteDetails {
            client_name: self.client_name.trim().to_string(),
            quote_date: self.quote_date.unwrap_or(today),
            items: self.items,
            shipping: Shipping {
                method: self.shipping.method,
                cost: self.shipping.cost,
                time: self.shipping.time,
            },
            remarks: self.remarks.filter(|remarks| !remarks.trim().is_empty()),
            discount,
        })
    }
}
