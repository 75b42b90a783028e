//! AppError 与 HTTP 错误信封

use std::collections::HashMap;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::category::ErrorCategory;
use super::codes::ErrorCode;

/// Error returned by every gateway, manager and handler.
///
/// `message` is shown verbatim in destructive notifications, so backend
/// failures keep the driver's text (e.g. "database is locked").
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Field-level context (`field`, `id`, `column`, ...)
    pub details: Option<HashMap<String, Value>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Error carrying the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Rejected input, never reached storage
    pub fn is_validation(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ValidationFailed
                | ErrorCode::RequiredField
                | ErrorCode::ValueOutOfRange
                | ErrorCode::InvalidFormat
                | ErrorCode::OrderEmpty
                | ErrorCode::TableNumberRequired
                | ErrorCode::InvalidStockLevel
                | ErrorCode::MenuItemInvalidPrice
                | ErrorCode::MenuItemUnavailable
        )
    }
}

/// JSON body of a failed request
///
/// ```json
/// { "code": 4002, "message": "Table number is required", "details": { "field": "table_number" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ApiResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self.code.category() {
            ErrorCategory::System => {
                tracing::error!(code = %self.code, message = %self.message, "Request failed")
            }
            _ if self.is_validation() => {
                tracing::debug!(code = %self.code, message = %self.message, "Request rejected")
            }
            _ => {}
        }
        (self.http_status(), axum::Json(ApiResponse::from(&self))).into_response()
    }
}
