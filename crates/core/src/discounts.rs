//! Discount utilities
//!
//! Rates travel through the crate as [`Percentage`] values holding a fraction (`0.25` for 25%).
//! These helpers convert them to plain decimals for arithmetic and display.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors specific to discount rates.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// The rate could not be parsed.
    #[error("invalid percentage: {0}")]
    InvalidPercentage(String),
}

/// Returns the fractional value of a percentage (`0.25` for 25%).
pub fn fraction(percent: &Percentage) -> Decimal {
    (*percent) * Decimal::ONE // decimal_percentage doesn't expose the underlying Decimal
}

/// Returns what is left of `amount` after taking `percent` off, or `None` on overflow.
pub fn apply_discount(amount: Decimal, percent: &Percentage) -> Option<Decimal> {
    Decimal::ONE
        .checked_sub(fraction(percent))
        .and_then(|remaining| amount.checked_mul(remaining))
}

/// Converts a fractional percentage to percent points for display (`0.1` becomes `10`).
///
/// Returns `None` if the rate is too large to scale.
pub fn percent_points(percent: &Percentage) -> Option<Decimal> {
    fraction(percent)
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|d| d.normalize())
}

/// Parse a rate written either as percent points (`"15%"`) or as a fraction (`"0.15"`).
///
/// # Errors
///
/// Returns [`DiscountError::InvalidPercentage`] if the number cannot be parsed.
pub fn parse_percentage(s: &str) -> Result<Percentage, DiscountError> {
    let trimmed = s.trim();

    let (number, is_points) = match trimmed.strip_suffix('%') {
        Some(points) => (points.trim(), true),
        None => (trimmed, false),
    };

    let value = number
        .parse::<Decimal>()
        .map_err(|_err| DiscountError::InvalidPercentage(s.to_string()))?;

    if is_points {
        Ok(Percentage::from(value / Decimal::ONE_HUNDRED))
    } else {
        Ok(Percentage::from(value))
    }
}
