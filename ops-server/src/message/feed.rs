//! 变更通知频道
//!
//! # 架构
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        ChangeFeed                          │
//! │  menu_items ─▶ broadcast::Sender<ChangeEvent>              │
//! │  inventory  ─▶ broadcast::Sender<ChangeEvent>              │
//! │  orders     ─▶ broadcast::Sender<ChangeEvent>              │
//! │  staff      ─▶ broadcast::Sender<ChangeEvent>              │
//! │  (all)      ─▶ broadcast::Sender<ChangeEvent>  (WebSocket) │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! 写入成功后发布；订阅者收到事件后重新拉取列表。落后超过频道容量的
//! 订阅者只会收到一条 `Resync` 事件，而不是错误。

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use shared::message::{ChangeAction, ChangeEvent};
use shared::types::Collection;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每个集合维护独立的版本号，支持原子递增。
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<Collection, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 递增指定集合的版本号并返回新值 (首次返回 1)
    pub fn increment(&self, collection: Collection) -> u64 {
        let mut entry = self.versions.entry(collection).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 当前版本号，未写入过返回 0
    pub fn get(&self, collection: Collection) -> u64 {
        self.versions.get(&collection).map(|v| *v).unwrap_or(0)
    }
}

#[derive(Debug)]
struct FeedInner {
    channels: HashMap<Collection, broadcast::Sender<ChangeEvent>>,
    all: broadcast::Sender<ChangeEvent>,
    versions: ResourceVersions,
    shutdown: CancellationToken,
}

/// Per-collection change feed
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    inner: Arc<FeedInner>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Collection::ALL
            .into_iter()
            .map(|c| (c, broadcast::channel(capacity).0))
            .collect();
        let (all, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(FeedInner {
                channels,
                all,
                versions: ResourceVersions::new(),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    fn sender(&self, collection: Collection) -> &broadcast::Sender<ChangeEvent> {
        // every collection gets a channel in `new`
        &self.inner.channels[&collection]
    }

    /// 发布变更 (写入成功后调用)
    ///
    /// 没有订阅者不算错误。
    pub fn publish<T: Serialize>(
        &self,
        collection: Collection,
        action: ChangeAction,
        id: i64,
        data: Option<&T>,
    ) -> ChangeEvent {
        let version = self.inner.versions.increment(collection);
        let event = ChangeEvent::new(
            collection,
            action,
            id,
            version,
            data.and_then(|d| serde_json::to_value(d).ok()),
        );
        let receivers = self.sender(collection).send(event.clone()).unwrap_or(0);
        let _ = self.inner.all.send(event.clone());
        tracing::debug!(
            collection = %collection,
            action = %action,
            id,
            version,
            receivers,
            "Change published"
        );
        event
    }

    /// 订阅单个集合
    pub fn subscribe(&self, collection: Collection) -> broadcast::Receiver<ChangeEvent> {
        self.sender(collection).subscribe()
    }

    /// 订阅全部集合 (WebSocket 变更流)
    pub fn subscribe_all(&self) -> broadcast::Receiver<ChangeEvent> {
        self.inner.all.subscribe()
    }

    /// Spawn a listener that calls `callback` for every change on `collection`.
    ///
    /// The listener stops when the returned [`Subscription`] is dropped or
    /// unsubscribed, or when the feed shuts down.
    pub fn subscribe_with<F, Fut>(&self, collection: Collection, callback: F) -> Subscription
    where
        F: Fn(ChangeEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut rx = self.subscribe(collection);
        let token = self.inner.shutdown.child_token();
        let listener_token = token.clone();
        let feed = self.clone();

        tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    biased;
                    _ = listener_token.cancelled() => break,
                    received = rx.recv() => match received {
                        Ok(event) => event,
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(
                                collection = %collection,
                                skipped,
                                "Subscriber lagged, triggering resync"
                            );
                            ChangeEvent::resync(collection, feed.version(collection))
                        }
                        Err(RecvError::Closed) => break,
                    },
                };
                callback(event).await;
            }
            tracing::debug!(collection = %collection, "Subscription listener stopped");
        });

        Subscription { collection, token }
    }

    pub fn version(&self, collection: Collection) -> u64 {
        self.inner.versions.get(collection)
    }

    /// 当前订阅者数量
    pub fn receiver_count(&self, collection: Collection) -> usize {
        self.sender(collection).receiver_count()
    }

    /// 停止所有监听任务
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }
}

/// Handle for a callback subscription
#[derive(Debug)]
pub struct Subscription {
    collection: Collection,
    token: CancellationToken,
}

impl Subscription {
    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn unsubscribe(self) {
        self.token.cancel();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
