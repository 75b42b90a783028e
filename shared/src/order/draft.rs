//! Order draft (cart)
//!
//! A session-scoped accumulator of lines keyed by menu item id. It has no
//! persisted identity until [`OrderDraft::submission`] hands it to the order
//! manager.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::{MenuItem, OrderLine};
use crate::util::{non_blank, parse_tag_list};

use super::pricing::{MAX_PRICE, MAX_QUANTITY};

/// Draft / submission rejection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is currently unavailable")]
    ItemUnavailable(String),

    #[error("table number is required")]
    TableNumberRequired,

    #[error("table number must be positive, got {0}")]
    InvalidTableNumber(i32),

    #[error("cannot submit an empty order")]
    EmptyCart,

    #[error("line {0} has zero quantity")]
    ZeroQuantity(String),

    #[error("line {name} quantity {quantity} exceeds the maximum of {max}", max = MAX_QUANTITY)]
    QuantityTooLarge { name: String, quantity: u32 },

    #[error("line {name} price must be within [0, {max}], got {price}", max = MAX_PRICE)]
    InvalidPrice { name: String, price: Decimal },

    #[error("order amount is too large")]
    AmountOverflow,
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        let code = match &err {
            DraftError::ItemUnavailable(_) => ErrorCode::MenuItemUnavailable,
            DraftError::TableNumberRequired | DraftError::InvalidTableNumber(_) => {
                ErrorCode::TableNumberRequired
            }
            DraftError::EmptyCart => ErrorCode::OrderEmpty,
            DraftError::ZeroQuantity(_) | DraftError::QuantityTooLarge { .. } => {
                ErrorCode::ValueOutOfRange
            }
            DraftError::InvalidPrice { .. } => ErrorCode::MenuItemInvalidPrice,
            DraftError::AmountOverflow => ErrorCode::ValueOutOfRange,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// One cart line, snapshotted from the menu item when first added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLine {
    pub menu_item_id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    pub ingredients: Option<String>,
    pub allergens: Vec<String>,
}

impl DraftLine {
    fn to_order_line(&self) -> OrderLine {
        OrderLine {
            name: self.name.clone(),
            quantity: self.quantity,
            price: self.price,
            ingredients: self.ingredients.clone(),
        }
    }
}

/// Cart for one waiter session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    lines: Vec<DraftLine>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`.
    ///
    /// An existing line for the same menu item gets `quantity + 1`; otherwise
    /// a new line is appended with the item's current name, price,
    /// ingredients and allergens. Returns the line's new quantity.
    pub fn add_item(&mut self, item: &MenuItem) -> Result<u32, DraftError> {
        if !item.available {
            return Err(DraftError::ItemUnavailable(item.name.clone()));
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.menu_item_id == item.id) {
            line.quantity += 1;
            return Ok(line.quantity);
        }
        self.lines.push(DraftLine {
            menu_item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
            ingredients: item.ingredients.clone(),
            allergens: item.allergens.clone(),
        });
        Ok(1)
    }

    /// Remove the whole line for `menu_item_id`. Unknown ids are a no-op.
    pub fn remove_item(&mut self, menu_item_id: i64) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.menu_item_id != menu_item_id);
        self.lines.len() != before
    }

    /// Union of every line's allergens, for the pre-submit warning
    pub fn allergen_union(&self) -> BTreeSet<String> {
        self.lines
            .iter()
            .flat_map(|l| l.allergens.iter().cloned())
            .collect()
    }

    /// Total units across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn quantity_of(&self, menu_item_id: i64) -> u32 {
        self.lines
            .iter()
            .find(|l| l.menu_item_id == menu_item_id)
            .map_or(0, |l| l.quantity)
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Order line snapshots in cart order
    pub fn to_order_lines(&self) -> Vec<OrderLine> {
        self.lines.iter().map(DraftLine::to_order_line).collect()
    }

    /// Build a validated submission.
    ///
    /// `allergy_note` is the free-text field ("nuts, dairy"); it is split into
    /// tags. The draft itself is left untouched so a failed insert can be
    /// retried.
    pub fn submission(
        &self,
        table_number: Option<i32>,
        special_instructions: Option<String>,
        allergy_note: &str,
    ) -> Result<OrderSubmission, DraftError> {
        let submission = OrderSubmission {
            table_number,
            items: self.to_order_lines(),
            special_instructions: non_blank(special_instructions),
            allergies: parse_tag_list(allergy_note),
        };
        submission.validate()?;
        Ok(submission)
    }
}

/// Order as submitted by a waiter, before pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub table_number: Option<i32>,
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl OrderSubmission {
    /// Precondition for creating an order: a positive table number and at
    /// least one line, every line passing [`validate_line`].
    pub fn validate(&self) -> Result<(), DraftError> {
        match self.table_number {
            None => return Err(DraftError::TableNumberRequired),
            Some(n) if n <= 0 => return Err(DraftError::InvalidTableNumber(n)),
            Some(_) => {}
        }
        if self.items.is_empty() {
            return Err(DraftError::EmptyCart);
        }
        self.items.iter().try_for_each(validate_line)
    }
}

/// Quantity in `1..=MAX_QUANTITY`, unit price in `0..=MAX_PRICE`
pub fn validate_line(line: &OrderLine) -> Result<(), DraftError> {
    if line.quantity == 0 {
        return Err(DraftError::ZeroQuantity(line.name.clone()));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(DraftError::QuantityTooLarge {
            name: line.name.clone(),
            quantity: line.quantity,
        });
    }
    if line.price < Decimal::ZERO || line.price > MAX_PRICE {
        return Err(DraftError::InvalidPrice {
            name: line.name.clone(),
            price: line.price,
        });
    }
    Ok(())
}
