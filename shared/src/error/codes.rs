//! Numeric error codes
//!
//! | Range | Domain |
//! |-------|--------|
//! | 0xxx  | general / validation |
//! | 4xxx  | orders |
//! | 5xxx  | inventory |
//! | 6xxx  | menu |
//! | 8xxx  | staff |
//! | 9xxx  | system |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Serialized as its bare `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    InvalidRequest = 5,
    InvalidFormat = 6,
    RequiredField = 7,
    ValueOutOfRange = 8,

    OrderNotFound = 4001,
    OrderAlreadyCompleted = 4003,
    OrderEmpty = 4007,
    TableNumberRequired = 4008,
    /// Not a forward edge of pending → preparing → ready → completed
    InvalidStatusTransition = 4010,
    /// ready → completed while the policy hides it
    CompletionNotExposed = 4011,
    /// Strict decode of a stored line-item payload failed
    OrderItemsCorrupted = 4012,

    InventoryItemNotFound = 5001,
    InvalidStockLevel = 5002,

    MenuItemNotFound = 6001,
    MenuItemInvalidPrice = 6002,
    MenuItemUnavailable = 6003,

    StaffMemberNotFound = 8001,

    DatabaseError = 9002,
    ChangeFeedClosed = 9301,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 23] = [
        Self::Success,
        Self::ValidationFailed,
        Self::NotFound,
        Self::AlreadyExists,
        Self::InvalidRequest,
        Self::InvalidFormat,
        Self::RequiredField,
        Self::ValueOutOfRange,
        Self::OrderNotFound,
        Self::OrderAlreadyCompleted,
        Self::OrderEmpty,
        Self::TableNumberRequired,
        Self::InvalidStatusTransition,
        Self::CompletionNotExposed,
        Self::OrderItemsCorrupted,
        Self::InventoryItemNotFound,
        Self::InvalidStockLevel,
        Self::MenuItemNotFound,
        Self::MenuItemInvalidPrice,
        Self::MenuItemUnavailable,
        Self::StaffMemberNotFound,
        Self::DatabaseError,
        Self::ChangeFeedClosed,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message when the caller has nothing more specific
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Record not found",
            Self::AlreadyExists => "Record already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field is missing",
            Self::ValueOutOfRange => "Value is out of range",
            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyCompleted => "Order has already been completed",
            Self::OrderEmpty => "Order is empty",
            Self::TableNumberRequired => "Table number is required",
            Self::InvalidStatusTransition => "Invalid order status transition",
            Self::CompletionNotExposed => "Completing orders is not enabled",
            Self::OrderItemsCorrupted => "Order items could not be decoded",
            Self::InventoryItemNotFound => "Inventory item not found",
            Self::InvalidStockLevel => "Stock level must be a non-negative number",
            Self::MenuItemNotFound => "Menu item not found",
            Self::MenuItemInvalidPrice => "Menu item has invalid price",
            Self::MenuItemUnavailable => "Menu item is unavailable",
            Self::StaffMemberNotFound => "Staff member not found",
            Self::DatabaseError => "Database error",
            Self::ChangeFeedClosed => "Change feed closed",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error code {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
