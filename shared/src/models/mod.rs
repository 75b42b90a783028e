//! Data models
//!
//! Shared between ops-server and front-end shells (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`;
//! records carrying `Decimal` money are mapped through row structs in the
//! server's repositories. All IDs are `i64` snowflakes.

pub mod inventory;
pub mod menu_item;
pub mod order;
pub mod role;
pub mod staff;

// Re-exports
pub use inventory::*;
pub use menu_item::*;
pub use order::*;
pub use role::*;
pub use staff::*;
