//! Live list: a collection snapshot kept fresh by the change feed
//!
//! ```text
//! open()
//!     ├─ 1. Subscribe to the collection channel
//!     ├─ 2. Initial list
//!     └─ 3. Every change event (or resync) re-lists the whole collection
//! ```
//!
//! Fetch failures are reported to the notification sink as
//! "Error fetching {label}" and the previous snapshot is kept. Reloads run
//! one at a time, so a slow older fetch never overwrites a newer list.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::notification::{Notification, NotificationSink};
use shared::types::ListQuery;
use tokio::sync::{Mutex, watch};

use crate::db::repository::Repository;
use crate::gateway::CollectionGateway;
use crate::message::Subscription;

struct Loader<R: Repository> {
    gateway: CollectionGateway<R>,
    query: ListQuery,
    label: &'static str,
    records: RwLock<Vec<R::Record>>,
    /// Held across fetch + store
    reloading: Mutex<()>,
    sink: Arc<dyn NotificationSink>,
    refreshed: watch::Sender<u64>,
}

impl<R: Repository> Loader<R> {
    async fn reload(&self) {
        let _guard = self.reloading.lock().await;
        match self.gateway.list(&self.query).await {
            Ok(records) => *self.records.write() = records,
            Err(e) => {
                tracing::warn!(collection = %R::COLLECTION, error = %e, "Live list refresh failed");
                self.sink
                    .notify(Notification::error(format!("Error fetching {}", self.label), &e));
            }
        }
        self.refreshed.send_modify(|n| *n += 1);
    }
}

pub struct LiveList<R: Repository> {
    loader: Arc<Loader<R>>,
    subscription: Subscription,
}

impl<R: Repository> LiveList<R> {
    pub async fn open(
        gateway: CollectionGateway<R>,
        query: ListQuery,
        label: &'static str,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let (refreshed, _) = watch::channel(0);
        let loader = Arc::new(Loader {
            gateway: gateway.clone(),
            query,
            label,
            records: RwLock::new(Vec::new()),
            reloading: Mutex::new(()),
            sink,
            refreshed,
        });

        let listener = loader.clone();
        let subscription = gateway.subscribe(move |_event| {
            let listener = listener.clone();
            async move { listener.reload().await }
        });
        loader.reload().await;

        Self {
            loader,
            subscription,
        }
    }

    /// Current rows in list order
    pub fn snapshot(&self) -> Vec<R::Record> {
        self.loader.records.read().clone()
    }

    pub fn find(&self, predicate: impl Fn(&R::Record) -> bool) -> Option<R::Record> {
        self.loader.records.read().iter().find(|r| predicate(r)).cloned()
    }

    pub fn len(&self) -> usize {
        self.loader.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-list now, without waiting for a change event
    pub async fn refresh(&self) {
        self.loader.reload().await;
    }

    /// Completed refresh count; changes after every reload attempt
    pub fn refreshes(&self) -> watch::Receiver<u64> {
        self.loader.refreshed.subscribe()
    }

    pub fn is_live(&self) -> bool {
        self.subscription.is_active()
    }

    /// Stop following changes
    pub fn close(self) {
        self.subscription.unsubscribe();
    }
}
