//! 变更通知消息类型定义
//!
//! 每次成功写入后由 ops-server 在对应集合的频道上广播，
//! 订阅者收到后重新拉取列表。

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::types::{Collection, Timestamp};
use crate::util::now_millis;

/// 变更类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
    /// 订阅者落后于频道容量，需要全量刷新
    Resync,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Created => "created",
            ChangeAction::Updated => "updated",
            ChangeAction::Deleted => "deleted",
            ChangeAction::Resync => "resync",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 变更事件载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// 事件 ID (用于追踪)
    pub event_id: Uuid,
    /// 集合
    pub collection: Collection,
    /// 变更类型
    pub action: ChangeAction,
    /// 记录 ID (Resync 时为 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// 集合版本号 (单调递增)
    pub version: u64,
    /// 写入后的记录 (deleted 时为 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub timestamp: Timestamp,
}

impl ChangeEvent {
    pub fn new(
        collection: Collection,
        action: ChangeAction,
        id: i64,
        version: u64,
        data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            collection,
            action,
            id: Some(id),
            version,
            data,
            timestamp: now_millis(),
        }
    }

    /// Synthesized for a subscriber that missed events
    pub fn resync(collection: Collection, version: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            collection,
            action: ChangeAction::Resync,
            id: None,
            version,
            data: None,
            timestamp: now_millis(),
        }
    }

    pub fn is_resync(&self) -> bool {
        self.action == ChangeAction::Resync
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_event_serialize() {
        let event = ChangeEvent::new(Collection::Orders, ChangeAction::Created, 42, 3, None);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["collection"], "orders");
        assert_eq!(json["action"], "created");
        assert_eq!(json["id"], 42);
        assert_eq!(json["version"], 3);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_resync_has_no_id() {
        let event = ChangeEvent::resync(Collection::Staff, 9);
        assert!(event.is_resync());
        assert_eq!(event.id, None);
    }
}
