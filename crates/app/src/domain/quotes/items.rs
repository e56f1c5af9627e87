//! Stored line item encoding.

use quotation::{
    items::{ItemCategory, LineItem},
    pricing::PricingError,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while encoding line items for storage.
#[derive(Debug, Error)]
pub(crate) enum EncodeItemsError {
    /// A line total could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// JSON serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Line item as it is laid out in the `items` column.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLineItem {
    #[serde(rename = "Item")]
    category: ItemCategory,

    #[serde(rename = "Specifications", default)]
    specification: String,

    #[serde(rename = "Size", default)]
    size: String,

    #[serde(rename = "Qty")]
    quantity: Decimal,

    #[serde(rename = "Unit price($)")]
    unit_price: Decimal,

    /// Written for readers of the raw column; recomputed on load.
    #[serde(rename = "Total price($)", default, skip_deserializing)]
    total_price: Decimal,
}

impl TryFrom<&LineItem> for StoredLineItem {
    type Error = PricingError;

    fn try_from(item: &LineItem) -> Result<Self, Self::Error> {
        Ok(Self {
            category: item.category,
            specification: item.specification.clone(),
            size: item.size.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price()?,
        })
    }
}

impl From<StoredLineItem> for LineItem {
    fn from(stored: StoredLineItem) -> Self {
        LineItem::new(
            stored.category,
            stored.specification,
            stored.size,
            stored.quantity,
            stored.unit_price,
        )
    }
}

/// Encode line items as the JSON text stored in the `items` column.
pub(crate) fn encode_items(items: &[LineItem]) -> Result<String, EncodeItemsError> {
    let stored = items
        .iter()
        .map(StoredLineItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(serde_json::to_string(&stored)?)
}

/// Decode the `items` column. Amounts may be JSON strings or numbers.
///
/// The column may also hold the array wrapped in a JSON string literal, which is how
/// older rows were written.
pub(crate) fn decode_items(json: &str) -> Result<Vec<LineItem>, serde_json::Error> {
    let stored: Vec<StoredLineItem> = match serde_json::from_str(json)? {
        Value::String(encoded) => serde_json::from_str(&encoded)?,
        value => serde_json::from_value(value)?,
    };

    Ok(stored.into_iter().map(LineItem::from).collect())
}
