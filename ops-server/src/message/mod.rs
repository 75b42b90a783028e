//! 变更通知
//!
//! - [`ChangeFeed`] - 每个集合一个 broadcast 频道
//! - [`Subscription`] - 回调订阅句柄 (drop 即取消)
//! - [`ResourceVersions`] - 集合版本号

pub mod feed;

pub use feed::{ChangeFeed, ResourceVersions, Subscription};
pub use shared::message::{ChangeAction, ChangeEvent};
