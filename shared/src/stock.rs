//! Stock status classification
//!
//! Converts stock levels into the three-valued health indicator shown on the
//! inventory screens. The rule is evaluated in order, first match wins:
//!
//! | condition                         | status     |
//! |-----------------------------------|------------|
//! | `current <= min * 0.5`            | `critical` |
//! | `current <= min`                  | `low`      |
//! | otherwise                         | `good`     |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};
use crate::models::InventoryItem;

/// Fraction of `min_stock` at or below which stock is critical
pub const CRITICAL_RATIO: f64 = 0.5;

/// Derived stock health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum StockStatus {
    #[default]
    Good,
    Low,
    Critical,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Good => "good",
            StockStatus::Low => "low",
            StockStatus::Critical => "critical",
        }
    }

    /// Low or critical stock shows up on the kitchen alert list
    pub fn needs_attention(&self) -> bool {
        !matches!(self, StockStatus::Good)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(StockStatus::Good),
            "low" => Ok(StockStatus::Low),
            "critical" => Ok(StockStatus::Critical),
            other => Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("unknown stock status: {other}"),
            )),
        }
    }
}

/// Classify a stock level.
///
/// Total over all non-negative inputs. With `min_stock == 0` both thresholds
/// collapse to zero: an empty shelf is `critical`, anything above is `good`.
pub fn classify(current_stock: f64, min_stock: f64) -> StockStatus {
    if current_stock <= min_stock * CRITICAL_RATIO {
        StockStatus::Critical
    } else if current_stock <= min_stock {
        StockStatus::Low
    } else {
        StockStatus::Good
    }
}

/// Validate a stock quantity before it is written
pub fn validate_stock_level(value: f64, field_name: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidStockLevel,
            format!("{field_name} must be a non-negative number, got {value}"),
        )
        .with_detail("field", field_name));
    }
    Ok(())
}

/// Per-status counts for the inventory dashboards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummary {
    pub total: usize,
    pub good: usize,
    pub low: usize,
    pub critical: usize,
}

impl StockSummary {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = StockStatus>,
    {
        statuses.into_iter().fold(Self::default(), |mut acc, status| {
            acc.total += 1;
            match status {
                StockStatus::Good => acc.good += 1,
                StockStatus::Low => acc.low += 1,
                StockStatus::Critical => acc.critical += 1,
            }
            acc
        })
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a InventoryItem>,
    {
        Self::from_statuses(records.into_iter().map(|r| r.status))
    }
}
