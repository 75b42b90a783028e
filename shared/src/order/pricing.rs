//! Order pricing using rust_decimal for precision
//!
//! subtotal = Σ(price × quantity), tax = subtotal × rate, total = subtotal + tax.
//! Subtotal and tax are each rounded to 2 decimal places (half-up) and the
//! total is the sum of the rounded parts, so the three always reconcile.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorCode};
use crate::models::OrderLine;

use super::draft::{DraftError, validate_line};

/// Rounding precision for monetary values
const DECIMAL_PLACES: u32 = 2;

/// Largest accepted unit price (1,000,000)
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Largest accepted quantity on one line
pub const MAX_QUANTITY: u32 = 9999;

#[inline]
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Sales tax rate as a fraction (0.10 = 10 %)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl TaxRate {
    /// 10 %
    pub const DEFAULT: TaxRate = TaxRate(Decimal::from_parts(10, 0, 0, false, 2));

    /// Build a rate, rejecting anything outside `[0, 1]`
    pub fn new(rate: Decimal) -> Result<Self, AppError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("tax rate must be within [0, 1], got {rate}"),
            )
            .with_detail("field", "tax_rate"));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::str::FromStr for TaxRate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rate = Decimal::from_str(s.trim()).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("invalid tax rate {s:?}: {e}"))
        })?;
        Self::new(rate)
    }
}

/// Derived order amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Price a list of lines at the given rate
///
/// Every line is checked with [`validate_line`] first, so client-built lines
/// can't produce negative amounts.
pub fn price_lines(lines: &[OrderLine], rate: TaxRate) -> Result<PriceBreakdown, DraftError> {
    let mut raw = Decimal::ZERO;
    for line in lines {
        validate_line(line)?;
        raw = line
            .line_total()
            .and_then(|t| raw.checked_add(t))
            .ok_or(DraftError::AmountOverflow)?;
    }
    let subtotal = round_money(raw);
    let tax = subtotal
        .checked_mul(rate.value())
        .map(round_money)
        .ok_or(DraftError::AmountOverflow)?;
    let total = subtotal.checked_add(tax).ok_or(DraftError::AmountOverflow)?;
    Ok(PriceBreakdown {
        subtotal,
        tax,
        total,
    })
}
