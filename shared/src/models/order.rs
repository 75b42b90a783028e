//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::OrderStatus;
use crate::types::Timestamp;

/// Order line snapshot
///
/// Copied from the menu item when it was added to the cart; later menu edits
/// never change a submitted line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    /// Unit price in currency unit
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
}

impl OrderLine {
    /// price × quantity, unrounded. `None` on overflow.
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub table_number: i32,
    pub status: OrderStatus,
    pub items: Vec<OrderLine>,
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a priced order
///
/// Built by the order manager from a validated submission; totals are already
/// derived at this point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_number: i32,
    pub status: OrderStatus,
    pub items: Vec<OrderLine>,
    pub special_instructions: Option<String>,
    pub allergies: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Update order payload
///
/// Lines and totals are immutable after submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub special_instructions: Option<String>,
    /// Status the order must still have for the write to apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_status: Option<OrderStatus>,
}
