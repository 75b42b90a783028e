//! Repository Module
//!
//! CRUD over the four SQLite tables. Each repository implements
//! [`Repository`] so the persistence gateway can treat them uniformly.

pub mod inventory;
pub mod menu_item;
pub mod order;
pub mod query;
pub mod staff;

// Re-exports
pub use inventory::InventoryRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use staff::StaffRepository;

use std::future::Future;

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::types::{Collection, ListQuery};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{collection} record {id} not found")]
    NotFound { collection: Collection, id: i64 },

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Rejected by a domain rule (carries its own error code)
    #[error(transparent)]
    Rejected(#[from] AppError),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { collection, id } => {
                let code = match collection {
                    Collection::MenuItems => ErrorCode::MenuItemNotFound,
                    Collection::Inventory => ErrorCode::InventoryItemNotFound,
                    Collection::Orders => ErrorCode::OrderNotFound,
                    Collection::Staff => ErrorCode::StaffMemberNotFound,
                };
                AppError::with_message(code, format!("{} {id} not found", collection.name()))
                    .with_detail("id", id)
            }
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Rejected(app) => app,
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Common repository trait for basic CRUD
pub trait Repository: Clone + Send + Sync + 'static {
    type Record: Serialize + Clone + Send + Sync + 'static;
    type Create: Send + 'static;
    type Update: Send + 'static;

    const COLLECTION: Collection;

    fn record_id(record: &Self::Record) -> i64;

    fn find_all(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = RepoResult<Vec<Self::Record>>> + Send;

    fn find_by_id(&self, id: i64) -> impl Future<Output = RepoResult<Option<Self::Record>>> + Send;

    fn create(&self, data: Self::Create) -> impl Future<Output = RepoResult<Self::Record>> + Send;

    fn update(
        &self,
        id: i64,
        data: Self::Update,
    ) -> impl Future<Output = RepoResult<Self::Record>> + Send;

    /// `Ok(false)` when no row matched
    fn delete(&self, id: i64) -> impl Future<Output = RepoResult<bool>> + Send;
}

/// Map a money TEXT column back to `Decimal`
pub(crate) fn parse_money(raw: &str, column: &str) -> RepoResult<rust_decimal::Decimal> {
    raw.parse()
        .map_err(|e| RepoError::Database(format!("invalid {column} value {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_collection_code() {
        let err: AppError = RepoError::NotFound {
            collection: Collection::Orders,
            id: 9,
        }
        .into();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "orders 9 not found");

        let err: AppError = RepoError::NotFound {
            collection: Collection::Staff,
            id: 1,
        }
        .into();
        assert_eq!(err.code, ErrorCode::StaffMemberNotFound);
    }

    #[test]
    fn test_rejected_keeps_code() {
        let err: AppError =
            RepoError::Rejected(AppError::new(ErrorCode::MenuItemInvalidPrice)).into();
        assert_eq!(err.code, ErrorCode::MenuItemInvalidPrice);
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(
            parse_money("12.99", "price").unwrap(),
            rust_decimal::Decimal::new(1299, 2)
        );
        assert!(matches!(
            parse_money("abc", "price"),
            Err(RepoError::Database(_))
        ));
    }
}
