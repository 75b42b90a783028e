//! Persistence gateway
//!
//! Generic CRUD + subscribe over the four collections. Every successful
//! write publishes a [`ChangeEvent`](shared::message::ChangeEvent) on the
//! collection's channel after the write is acknowledged; there is no
//! optimistic local copy.

use std::future::Future;

use shared::error::AppResult;
use shared::message::{ChangeAction, ChangeEvent};
use shared::order::LineDecodePolicy;
use shared::types::{Collection, ListQuery};
use sqlx::SqlitePool;
use tokio::sync::broadcast;

use crate::db::repository::{
    InventoryRepository, MenuItemRepository, OrderRepository, RepoError, Repository,
    StaffRepository,
};
use crate::message::{ChangeFeed, Subscription};

/// Gateway over one collection
#[derive(Debug, Clone)]
pub struct CollectionGateway<R> {
    repo: R,
    feed: ChangeFeed,
}

impl<R: Repository> CollectionGateway<R> {
    pub fn new(repo: R, feed: ChangeFeed) -> Self {
        Self { repo, feed }
    }

    pub fn collection(&self) -> Collection {
        R::COLLECTION
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// List with optional filter; ordering falls back to the collection default
    pub async fn list(&self, query: &ListQuery) -> AppResult<Vec<R::Record>> {
        Ok(self.repo.find_all(query).await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<R::Record> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            RepoError::NotFound {
                collection: R::COLLECTION,
                id,
            }
            .into()
        })
    }

    pub async fn insert(&self, data: R::Create) -> AppResult<R::Record> {
        let record = self.repo.create(data).await?;
        self.feed.publish(
            R::COLLECTION,
            ChangeAction::Created,
            R::record_id(&record),
            Some(&record),
        );
        Ok(record)
    }

    pub async fn update(&self, id: i64, data: R::Update) -> AppResult<R::Record> {
        let record = self.repo.update(id, data).await?;
        self.feed
            .publish(R::COLLECTION, ChangeAction::Updated, id, Some(&record));
        Ok(record)
    }

    /// Delete by id; an unknown id is a not-found error and publishes nothing
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(RepoError::NotFound {
                collection: R::COLLECTION,
                id,
            }
            .into());
        }
        self.feed
            .publish::<()>(R::COLLECTION, ChangeAction::Deleted, id, None);
        Ok(())
    }

    /// Register a change callback for this collection
    pub fn subscribe<F, Fut>(&self, callback: F) -> Subscription
    where
        F: Fn(ChangeEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.feed.subscribe_with(R::COLLECTION, callback)
    }

    /// Raw receiver for this collection's channel
    pub fn receiver(&self) -> broadcast::Receiver<ChangeEvent> {
        self.feed.subscribe(R::COLLECTION)
    }
}

/// All four collection gateways sharing one feed
#[derive(Debug, Clone)]
pub struct PersistenceGateway {
    pub menu_items: CollectionGateway<MenuItemRepository>,
    pub inventory: CollectionGateway<InventoryRepository>,
    pub orders: CollectionGateway<OrderRepository>,
    pub staff: CollectionGateway<StaffRepository>,
    feed: ChangeFeed,
}

impl PersistenceGateway {
    pub fn new(pool: SqlitePool, feed: ChangeFeed, decode_policy: LineDecodePolicy) -> Self {
        Self {
            menu_items: CollectionGateway::new(MenuItemRepository::new(pool.clone()), feed.clone()),
            inventory: CollectionGateway::new(InventoryRepository::new(pool.clone()), feed.clone()),
            orders: CollectionGateway::new(
                OrderRepository::new(pool.clone(), decode_policy),
                feed.clone(),
            ),
            staff: CollectionGateway::new(StaffRepository::new(pool), feed.clone()),
            feed,
        }
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }
}
