//! Items

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::PricingError;

/// Errors raised while reading line item data.
#[derive(Debug, Error, PartialEq)]
pub enum ItemError {
    /// The category is not one of the quoted product lines.
    #[error("unknown item category: {0}")]
    UnknownCategory(String),
}

/// Product line a quote item belongs to.
///
/// Serialized lowercase; deserialized through [`FromStr`], so any casing is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ItemCategory {
    /// Keychains
    Keychain,

    /// Pins
    Pin,

    /// Stickers
    Sticker,
}

impl ItemCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Keychain, Self::Pin, Self::Sticker];

    /// Lowercase name used for display and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keychain => "keychain",
            Self::Pin => "pin",
            Self::Sticker => "sticker",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemCategory {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ItemError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for ItemCategory {
    type Error = ItemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single quoted line: one product line at a given size, quantity and unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product line
    pub category: ItemCategory,

    /// Free-text specification (material, plating, print, ...)
    #[serde(default)]
    pub specification: String,

    /// Free-text size
    #[serde(default)]
    pub size: String,

    /// Number of units
    pub quantity: Decimal,

    /// Price per unit in the quote currency
    pub unit_price: Decimal,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(
        category: ItemCategory,
        specification: impl Into<String>,
        size: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            category,
            specification: specification.into(),
            size: size.into(),
            quantity,
            unit_price,
        }
    }

    /// Price of the whole line (`quantity * unit_price`).
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the product exceeds the decimal range.
    pub fn total_price(&self) -> Result<Decimal, PricingError> {
        self.quantity
            .checked_mul(self.unit_price)
            .ok_or(PricingError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn total_price_is_quantity_times_unit_price() -> TestResult {
        let item = LineItem::new(
            ItemCategory::Pin,
            "soft enamel",
            "25mm",
            Decimal::from(150),
            Decimal::new(125, 2),
        );

        assert_eq!(item.total_price()?, Decimal::new(18750, 2));

        Ok(())
    }

    #[test]
    fn zero_quantity_totals_zero() -> TestResult {
        let item = LineItem::new(
            ItemCategory::Sticker,
            "",
            "",
            Decimal::ZERO,
            Decimal::new(99, 2),
        );

        assert_eq!(item.total_price()?, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn total_price_overflow_returns_error() {
        let item = LineItem::new(
            ItemCategory::Pin,
            "",
            "",
            Decimal::MAX,
            Decimal::from(2),
        );

        assert_eq!(item.total_price(), Err(PricingError::Overflow));
    }

    #[test]
    fn category_parses_case_insensitively() -> TestResult {
        assert_eq!("keychain".parse::<ItemCategory>()?, ItemCategory::Keychain);
        assert_eq!(" Pin ".parse::<ItemCategory>()?, ItemCategory::Pin);
        assert_eq!("STICKER".parse::<ItemCategory>()?, ItemCategory::Sticker);

        Ok(())
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert_eq!(
            "badge".parse::<ItemCategory>(),
            Err(ItemError::UnknownCategory("badge".to_string()))
        );
    }

    #[test]
    fn category_deserializes_through_from_str() -> TestResult {
        let categories: Vec<ItemCategory> =
            serde_json::from_str(r#"["keychain", "Pin", " STICKER "]"#)?;

        assert_eq!(
            categories,
            vec![ItemCategory::Keychain, ItemCategory::Pin, ItemCategory::Sticker]
        );

        Ok(())
    }

    #[test]
    fn category_deserialization_rejects_unknown_names() {
        let result = serde_json::from_str::<ItemCategory>(r#""badge""#);

        assert!(
            result.is_err_and(|error| error.to_string().contains("unknown item category: badge")),
            "unknown category should be rejected"
        );
    }

    #[test]
    fn category_serializes_lowercase() -> TestResult {
        assert_eq!(serde_json::to_string(&ItemCategory::Keychain)?, r#""keychain""#);

        Ok(())
    }

    #[test]
    fn category_display_matches_storage_name() {
        for category in ItemCategory::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
