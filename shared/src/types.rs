//! Common types for the shared crate
//!
//! Collection identity and list-query shapes used by the persistence gateway.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// The four record collections behind the persistence gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    MenuItems,
    Inventory,
    Orders,
    Staff,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::MenuItems,
        Collection::Inventory,
        Collection::Orders,
        Collection::Staff,
    ];

    /// Table / channel name
    pub const fn name(&self) -> &'static str {
        match self {
            Collection::MenuItems => "menu_items",
            Collection::Inventory => "inventory",
            Collection::Orders => "orders",
            Collection::Staff => "staff",
        }
    }

    /// Default list ordering.
    ///
    /// These are product choices: inventory alphabetical, menu in the order
    /// it was authored, orders newest first, staff alphabetical.
    pub const fn default_ordering(&self) -> Ordering {
        match self {
            Collection::MenuItems => Ordering::asc("created_at"),
            Collection::Inventory => Ordering::asc("ingredient"),
            Collection::Orders => Ordering::desc("created_at"),
            Collection::Staff => Ordering::asc("name"),
        }
    }

    /// Columns a caller may sort by
    pub const fn sortable_columns(&self) -> &'static [&'static str] {
        match self {
            Collection::MenuItems => &["created_at", "updated_at", "name", "price", "category"],
            Collection::Inventory => &[
                "ingredient",
                "current_stock",
                "min_stock",
                "status",
                "created_at",
                "updated_at",
            ],
            Collection::Orders => &["created_at", "updated_at", "table_number", "status", "total"],
            Collection::Staff => &["name", "role", "shift", "status", "created_at", "updated_at"],
        }
    }

    /// Columns a caller may filter on (equality / inequality)
    pub const fn filterable_columns(&self) -> &'static [&'static str] {
        match self {
            Collection::MenuItems => &["category", "available"],
            Collection::Inventory => &["status", "unit"],
            Collection::Orders => &["status", "table_number"],
            Collection::Staff => &["role", "shift", "status"],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s || c.name().replace('_', "-") == s)
            .ok_or_else(|| format!("unknown collection: {s}"))
    }
}

/// Sort column and direction for a list call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ordering {
    pub column: &'static str,
    pub ascending: bool,
}

impl Ordering {
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            ascending: true,
        }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self {
            column,
            ascending: false,
        }
    }

    /// Resolve a caller-supplied column against the collection whitelist.
    pub fn resolve(collection: Collection, column: &str, ascending: bool) -> Option<Self> {
        collection
            .sortable_columns()
            .iter()
            .find(|c| **c == column)
            .map(|c| Self {
                column: c,
                ascending,
            })
    }

    pub fn direction(&self) -> &'static str {
        if self.ascending { "ASC" } else { "DESC" }
    }
}

/// Equality-style filter on a whitelisted column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFilter {
    pub column: &'static str,
    pub value: String,
    pub negate: bool,
}

impl FieldFilter {
    pub fn eq(collection: Collection, column: &str, value: impl Into<String>) -> Option<Self> {
        Self::build(collection, column, value.into(), false)
    }

    pub fn not_eq(collection: Collection, column: &str, value: impl Into<String>) -> Option<Self> {
        Self::build(collection, column, value.into(), true)
    }

    fn build(collection: Collection, column: &str, value: String, negate: bool) -> Option<Self> {
        collection
            .filterable_columns()
            .iter()
            .find(|c| **c == column)
            .map(|c| Self {
                column: c,
                value,
                negate,
            })
    }
}

/// `list(filter?, order_by, ascending)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub filter: Option<FieldFilter>,
    pub order: Option<Ordering>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: FieldFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order(mut self, order: Ordering) -> Self {
        self.order = Some(order);
        self
    }

    /// Ordering to apply, falling back to the collection default
    pub fn effective_order(&self, collection: Collection) -> Ordering {
        self.order.unwrap_or_else(|| collection.default_ordering())
    }
}
