//! Inventory Item Model

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::stock::{StockStatus, classify, validate_stock_level};
use crate::types::Timestamp;

/// Inventory item entity
///
/// `status` is derived from the stock levels and never accepted from callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: i64,
    pub ingredient: String,
    pub current_stock: f64,
    pub min_stock: f64,
    /// Unit of measure ("kg", "L", "pcs")
    pub unit: String,
    pub status: StockStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub ingredient: String,
    #[serde(default)]
    pub current_stock: f64,
    #[serde(default)]
    pub min_stock: f64,
    #[serde(default)]
    pub unit: String,
}

impl InventoryItemCreate {
    /// Validate and normalize before insert
    pub fn normalized(self) -> AppResult<Self> {
        let ingredient = self.ingredient.trim().to_string();
        if ingredient.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "ingredient must not be empty",
            )
            .with_detail("field", "ingredient"));
        }
        validate_stock_level(self.current_stock, "current_stock")?;
        validate_stock_level(self.min_stock, "min_stock")?;
        Ok(Self {
            ingredient,
            current_stock: self.current_stock,
            min_stock: self.min_stock,
            unit: self.unit.trim().to_string(),
        })
    }

    /// Status for a freshly created record
    pub fn status(&self) -> StockStatus {
        classify(self.current_stock, self.min_stock)
    }
}

/// Update inventory item payload
///
/// No `status` field: status follows the stock levels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    pub ingredient: Option<String>,
    pub current_stock: Option<f64>,
    pub min_stock: Option<f64>,
    pub unit: Option<String>,
}

impl InventoryItemUpdate {
    pub fn normalized(self) -> AppResult<Self> {
        let ingredient = match self.ingredient {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(AppError::with_message(
                        ErrorCode::RequiredField,
                        "ingredient must not be empty",
                    )
                    .with_detail("field", "ingredient"));
                }
                Some(name)
            }
            None => None,
        };
        if let Some(v) = self.current_stock {
            validate_stock_level(v, "current_stock")?;
        }
        if let Some(v) = self.min_stock {
            validate_stock_level(v, "min_stock")?;
        }
        Ok(Self {
            ingredient,
            current_stock: self.current_stock,
            min_stock: self.min_stock,
            unit: self.unit.map(|u| u.trim().to_string()),
        })
    }

    /// Whether this patch changes an input of the status rule
    pub fn touches_stock(&self) -> bool {
        self.current_stock.is_some() || self.min_stock.is_some()
    }

    /// Merge the patch over an existing record, recomputing status when needed.
    ///
    /// Fields absent from the patch keep their stored values.
    pub fn apply_to(&self, item: &InventoryItem, now: Timestamp) -> InventoryItem {
        let current_stock = self.current_stock.unwrap_or(item.current_stock);
        let min_stock = self.min_stock.unwrap_or(item.min_stock);
        let status = if self.touches_stock() {
            classify(current_stock, min_stock)
        } else {
            item.status
        };
        InventoryItem {
            id: item.id,
            ingredient: self
                .ingredient
                .clone()
                .unwrap_or_else(|| item.ingredient.clone()),
            current_stock,
            min_stock,
            unit: self.unit.clone().unwrap_or_else(|| item.unit.clone()),
            status,
            created_at: item.created_at,
            updated_at: now,
        }
    }
}
