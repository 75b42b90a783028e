//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::order::MAX_PRICE;
use crate::types::Timestamp;
use crate::util::{non_blank, normalize_tags};

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    /// Unit price (currency unit, non-negative)
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    /// Free-text ingredient list
    pub ingredients: Option<String>,
    /// Allergen tags, sorted and deduplicated
    #[serde(default)]
    pub allergens: Vec<String>,
    pub available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MenuItem {
    /// Case-insensitive match on name or category (waiter/admin search box)
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.category.to_lowercase().contains(&term)
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

impl MenuItemCreate {
    /// Validate and normalize before insert
    pub fn normalized(self) -> AppResult<Self> {
        let name = require_name(&self.name)?;
        validate_price(self.price)?;
        Ok(Self {
            name,
            price: self.price,
            category: self.category.trim().to_string(),
            ingredients: non_blank(self.ingredients),
            allergens: normalize_tags(&self.allergens),
            available: self.available,
        })
    }
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<Vec<String>>,
    pub available: Option<bool>,
}

impl MenuItemUpdate {
    /// Validate and normalize before update
    pub fn normalized(self) -> AppResult<Self> {
        let name = match self.name {
            Some(n) => Some(require_name(&n)?),
            None => None,
        };
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(Self {
            name,
            price: self.price,
            category: self.category.map(|c| c.trim().to_string()),
            ingredients: self.ingredients.map(|i| i.trim().to_string()),
            allergens: self.allergens.map(normalize_tags),
            available: self.available,
        })
    }
}

fn require_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "menu item name must not be empty",
        )
        .with_detail("field", "name"));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO || price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::MenuItemInvalidPrice,
            format!("price must be within [0, {MAX_PRICE}], got {price}"),
        )
        .with_detail("field", "price"));
    }
    Ok(())
}
