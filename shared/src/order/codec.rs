//! Order line-item codec
//!
//! Lines are persisted as a JSON array in a single text column. Reads go
//! through [`decode_lines`] with an explicit [`LineDecodePolicy`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::models::OrderLine;

/// What to do with an absent or unreadable line-item payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDecodePolicy {
    /// Degrade to an empty line list and log a warning
    #[default]
    Lenient,
    /// Surface a read error
    Strict,
}

impl FromStr for LineDecodePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(LineDecodePolicy::Lenient),
            "strict" => Ok(LineDecodePolicy::Strict),
            other => Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("unknown decode policy: {other}"),
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("order items payload is missing")]
    Missing,

    #[error("order items payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<CodecError> for AppError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Missing => AppError::with_message(
                ErrorCode::OrderItemsCorrupted,
                "order items payload is missing",
            ),
            CodecError::Malformed(e) => {
                AppError::with_message(ErrorCode::OrderItemsCorrupted, e.to_string())
            }
        }
    }
}

/// Encode lines for storage
pub fn encode_lines(lines: &[OrderLine]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(lines)?)
}

/// Decode a stored payload.
///
/// `None`, an empty string and malformed JSON all degrade to an empty list
/// under [`LineDecodePolicy::Lenient`]; `Strict` reports them as errors.
pub fn decode_lines(
    raw: Option<&str>,
    policy: LineDecodePolicy,
) -> Result<Vec<OrderLine>, CodecError> {
    let result = match raw.map(str::trim) {
        None | Some("") => Err(CodecError::Missing),
        Some(text) => serde_json::from_str::<Vec<OrderLine>>(text).map_err(CodecError::from),
    };

    match (result, policy) {
        (Ok(lines), _) => Ok(lines),
        (Err(e), LineDecodePolicy::Strict) => Err(e),
        (Err(e), LineDecodePolicy::Lenient) => {
            tracing::warn!(error = %e, "Order items unreadable, using empty line list");
            Ok(Vec::new())
        }
    }
}
