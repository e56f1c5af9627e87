//! Pricing
//!
//! The cost/price engine. Every step is exact decimal arithmetic; rounding only happens when a
//! breakdown is presented, so rounding error never compounds across steps.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::discounts::{apply_discount, fraction};

/// Profit margin applied to the total cost (30%).
pub const PROFIT_MARGIN: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Insurance (escrow) fee applied to the total cost (3%).
pub const INSURANCE_FEE_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

/// Fixed exchange rate between the purchasing currency (CNY) and the quote currency (USD).
pub const CNY_PER_USD: Decimal = Decimal::from_parts(73, 0, 0, false, 1);

/// Decimal places used when presenting a breakdown.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Errors raised while computing or presenting prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// An intermediate amount exceeded the representable decimal range.
    #[error("amount overflowed while computing a price")]
    Overflow,

    /// The amount could not be represented in minor units of the target currency.
    #[error("amount overflowed while converting currency")]
    Conversion,
}

/// Cost and price figures for one quoted product, in the purchasing currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    quantity: Decimal,
    discounted_cost: Decimal,
    tariff: Decimal,
    total_accessories_cost: Decimal,
    total_cost: Decimal,
    profit: Decimal,
    insurance_fee: Decimal,
    sale_price: Decimal,
}

/// Computes the cost and sale price breakdown for a product.
///
/// Rates are fractions (`0.05` for 5%). Inputs are not validated: negative values flow through
/// the arithmetic unchanged and a zero quantity simply yields zero totals.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any step exceeds the decimal range.
pub fn compute_quote(
    cost_price: Decimal,
    promotion_rate: Percentage,
    tariff_rate: Percentage,
    accessories_cost: Decimal,
    quantity: Decimal,
) -> Result<PriceBreakdown, PricingError> {
    let discounted_cost =
        apply_discount(cost_price, &promotion_rate).ok_or(PricingError::Overflow)?;

    let tariff = discounted_cost
        .checked_mul(fraction(&tariff_rate))
        .ok_or(PricingError::Overflow)?;

    let total_accessories_cost = accessories_cost
        .checked_mul(quantity)
        .ok_or(PricingError::Overflow)?;

    let total_cost = discounted_cost
        .checked_mul(quantity)
        .and_then(|total_cost_price| total_cost_price.checked_add(tariff))
        .and_then(|subtotal| subtotal.checked_add(total_accessories_cost))
        .ok_or(PricingError::Overflow)?;

    let profit = total_cost
        .checked_mul(PROFIT_MARGIN)
        .ok_or(PricingError::Overflow)?;

    let insurance_fee = total_cost
        .checked_mul(INSURANCE_FEE_RATE)
        .ok_or(PricingError::Overflow)?;

    let sale_price = total_cost
        .checked_add(profit)
        .and_then(|price| price.checked_add(insurance_fee))
        .ok_or(PricingError::Overflow)?;

    Ok(PriceBreakdown {
        quantity,
        discounted_cost,
        tariff,
        total_accessories_cost,
        total_cost,
        profit,
        insurance_fee,
        sale_price,
    })
}

impl PriceBreakdown {
    /// Quantity the breakdown was computed for
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Unit cost after the promotion rate
    pub fn discounted_cost(&self) -> Decimal {
        self.discounted_cost
    }

    /// Tariff charged on the discounted unit cost
    pub fn tariff(&self) -> Decimal {
        self.tariff
    }

    /// Accessories cost for the whole quantity
    pub fn total_accessories_cost(&self) -> Decimal {
        self.total_accessories_cost
    }

    /// Goods, tariff and accessories together
    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// Profit on the total cost
    pub fn profit(&self) -> Decimal {
        self.profit
    }

    /// Insurance fee on the total cost
    pub fn insurance_fee(&self) -> Decimal {
        self.insurance_fee
    }

    /// Total cost plus profit and insurance fee
    pub fn sale_price(&self) -> Decimal {
        self.sale_price
    }

    /// Returns a copy with every figure rounded to `dp` places, midpoint away from zero.
    #[must_use]
    pub fn rounded(&self, dp: u32) -> Self {
        let round =
            |value: Decimal| value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);

        Self {
            quantity: self.quantity,
            discounted_cost: round(self.discounted_cost),
            tariff: round(self.tariff),
            total_accessories_cost: round(self.total_accessories_cost),
            total_cost: round(self.total_cost),
            profit: round(self.profit),
            insurance_fee: round(self.insurance_fee),
            sale_price: round(self.sale_price),
        }
    }

    /// Labelled figures in presentation order.
    pub fn labelled(&self) -> [(&'static str, Decimal); 7] {
        [
            ("Discounted cost", self.discounted_cost),
            ("Tariff", self.tariff),
            ("Accessories cost", self.total_accessories_cost),
            ("Total cost", self.total_cost),
            ("Profit", self.profit),
            ("Insurance fee", self.insurance_fee),
            ("Sale price", self.sale_price),
        ]
    }

    /// Sale price converted to the quote currency at [`CNY_PER_USD`].
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Conversion`] if the converted amount does not fit in minor units.
    pub fn sale_price_usd(&self) -> Result<Money<'static, Currency>, PricingError> {
        usd_from_cny(self.sale_price)
    }

    /// Per-unit sale price converted to the quote currency; zero when the quantity is zero.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Conversion`] if the converted amount does not fit in minor units.
    pub fn unit_sale_price_usd(&self) -> Result<Money<'static, Currency>, PricingError> {
        if self.quantity.is_zero() {
            return Ok(Money::from_minor(0, iso::USD));
        }

        let unit = self
            .sale_price
            .checked_div(self.quantity)
            .ok_or(PricingError::Conversion)?;

        usd_from_cny(unit)
    }

    /// Writes the breakdown as a table, rounded for display.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["", "Amount (CNY)"]);

        for (label, value) in self.rounded(DISPLAY_DECIMAL_PLACES).labelled() {
            builder.push_record([label.to_string(), format!("{value:.2}")]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..2), Alignment::right());

        writeln!(out, "{table}")
    }
}

/// Convert a CNY amount to USD, rounded to whole cents.
fn usd_from_cny(amount: Decimal) -> Result<Money<'static, Currency>, PricingError> {
    let minor = amount
        .checked_div(CNY_PER_USD)
        .and_then(|usd| usd.checked_mul(Decimal::ONE_HUNDRED))
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
        .ok_or(PricingError::Conversion)?;

    Ok(Money::from_minor(minor, iso::USD))
}
