//! Menu Item Repository

use super::query::select_list;
use super::{RepoError, RepoResult, Repository, parse_money};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::types::{Collection, ListQuery};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;
use sqlx::types::Json;

const COLUMNS: &str =
    "id, name, price, category, ingredients, allergens, available, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    name: String,
    price: String,
    category: String,
    ingredients: Option<String>,
    allergens: Json<Vec<String>>,
    available: bool,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = RepoError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        Ok(MenuItem {
            id: row.id,
            name: row.name,
            price: parse_money(&row.price, "price")?,
            category: row.category,
            ingredients: row.ingredients,
            allergens: row.allergens.0,
            available: row.available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct MenuItemRepository {
    pool: SqlitePool,
}

impl MenuItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for MenuItemRepository {
    type Record = MenuItem;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;

    const COLLECTION: Collection = Collection::MenuItems;

    fn record_id(record: &MenuItem) -> i64 {
        record.id
    }

    async fn find_all(&self, query: &ListQuery) -> RepoResult<Vec<MenuItem>> {
        let mut builder = select_list(Self::COLLECTION, COLUMNS, query)?;
        let rows = builder
            .build_query_as::<MenuItemRow>()
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(MenuItem::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<MenuItem>> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {COLUMNS} FROM menu_items WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(MenuItem::try_from).transpose()
    }

    async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let data = data.normalized()?;
        let id = snowflake_id();
        let now = now_millis();
        sqlx::query(
            "INSERT INTO menu_items (id, name, price, category, ingredients, allergens, available, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.price.to_string())
        .bind(&data.category)
        .bind(&data.ingredients)
        .bind(Json(&data.allergens))
        .bind(data.available)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
    }

    async fn update(&self, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let data = data.normalized()?;
        let rows = sqlx::query(
            "UPDATE menu_items SET \
                name = COALESCE(?1, name), \
                price = COALESCE(?2, price), \
                category = COALESCE(?3, category), \
                ingredients = CASE WHEN ?4 IS NULL THEN ingredients ELSE NULLIF(?4, '') END, \
                allergens = COALESCE(?5, allergens), \
                available = COALESCE(?6, available), \
                updated_at = ?7 \
             WHERE id = ?8",
        )
        .bind(data.name)
        .bind(data.price.map(|p| p.to_string()))
        .bind(data.category)
        .bind(data.ingredients)
        .bind(data.allergens.map(Json))
        .bind(data.available)
        .bind(now_millis())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if rows.rows_affected() == 0 {
            return Err(RepoError::NotFound {
                collection: Self::COLLECTION,
                id,
            });
        }
        self.find_by_id(id).await?.ok_or(RepoError::NotFound {
            collection: Self::COLLECTION,
            id,
        })
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM menu_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(rows.rows_affected() > 0)
    }
}
