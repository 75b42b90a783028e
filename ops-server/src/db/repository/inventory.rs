//! Inventory Repository
//!
//! `status` is written only here, always from [`shared::stock::classify`].

use super::query::select_list;
use super::{RepoError, RepoResult, Repository};
use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use shared::types::{Collection, ListQuery};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, ingredient, current_stock, min_stock, unit, status, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for InventoryRepository {
    type Record = InventoryItem;
    type Create = InventoryItemCreate;
    type Update = InventoryItemUpdate;

    const COLLECTION: Collection = Collection::Inventory;

    fn record_id(record: &InventoryItem) -> i64 {
        record.id
    }

    async fn find_all(&self, query: &ListQuery) -> RepoResult<Vec<InventoryItem>> {
        let mut builder = select_list(Self::COLLECTION, COLUMNS, query)?;
        let items = builder
            .build_query_as::<InventoryItem>()
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {COLUMNS} FROM inventory WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn create(&self, data: InventoryItemCreate) -> RepoResult<InventoryItem> {
        let data = data.normalized()?;
        let id = snowflake_id();
        let now = now_millis();
        let status = data.status();
        sqlx::query(
            "INSERT INTO inventory (id, ingredient, current_stock, min_stock, unit, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&data.ingredient)
        .bind(data.current_stock)
        .bind(data.min_stock)
        .bind(&data.unit)
        .bind(status)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create inventory item".into()))
    }

    /// Read, merge and write in one transaction so the stored status always
    /// matches the stored levels.
    async fn update(&self, id: i64, data: InventoryItemUpdate) -> RepoResult<InventoryItem> {
        let data = data.normalized()?;
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {COLUMNS} FROM inventory WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepoError::NotFound {
            collection: Self::COLLECTION,
            id,
        })?;

        let merged = data.apply_to(&current, now_millis());
        if merged.status != current.status {
            tracing::debug!(
                id,
                ingredient = %merged.ingredient,
                from = %current.status,
                to = %merged.status,
                "Stock status changed"
            );
        }

        sqlx::query(
            "UPDATE inventory SET ingredient = ?, current_stock = ?, min_stock = ?, unit = ?, status = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&merged.ingredient)
        .bind(merged.current_stock)
        .bind(merged.min_stock)
        .bind(&merged.unit)
        .bind(merged.status)
        .bind(merged.updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(merged)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM inventory WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(rows.rows_affected() > 0)
    }
}
