//! Shared types for the restaurant operations core
//!
//! Domain models, the pure business rules (stock classification, pricing,
//! order drafts, order lifecycle, line-item codec), the unified error type
//! and change-feed payloads. Used by `ops-server` and by any front-end shell.

pub mod error;
pub mod message;
pub mod models;
pub mod notification;
pub mod order;
pub mod stock;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use message::{ChangeAction, ChangeEvent};
pub use notification::{Notification, NotificationSink, NotificationVariant, TracingSink};
pub use stock::{StockStatus, StockSummary, classify};
pub use types::{Collection, Timestamp};
