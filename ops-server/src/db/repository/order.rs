//! Order Repository
//!
//! Lines live in the `items` TEXT column as JSON; reads decode them through
//! the configured [`LineDecodePolicy`].

use super::query::select_list;
use super::{RepoError, RepoResult, Repository, parse_money};
use shared::models::{Order, OrderCreate, OrderUpdate};
use shared::order::{LineDecodePolicy, OrderStatus, TransitionError, decode_lines, encode_lines};
use shared::types::{Collection, ListQuery};
use shared::util::{non_blank, normalize_tags, now_millis, snowflake_id};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use sqlx::types::Json;

const COLUMNS: &str = "id, table_number, status, items, special_instructions, allergies, \
                       subtotal, tax, total, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    table_number: i32,
    status: OrderStatus,
    items: Option<String>,
    special_instructions: Option<String>,
    allergies: Json<Vec<String>>,
    subtotal: String,
    tax: String,
    total: String,
    created_at: i64,
    updated_at: i64,
}

#[derive(Clone, Debug)]
pub struct OrderRepository {
    pool: SqlitePool,
    decode_policy: LineDecodePolicy,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool, decode_policy: LineDecodePolicy) -> Self {
        Self {
            pool,
            decode_policy,
        }
    }

    fn to_order(&self, row: OrderRow) -> RepoResult<Order> {
        let items = decode_lines(row.items.as_deref(), self.decode_policy).map_err(|e| {
            tracing::error!(order_id = row.id, error = %e, "Order items could not be decoded");
            RepoError::Rejected(AppError::from(e).with_detail("id", row.id))
        })?;
        Ok(Order {
            id: row.id,
            table_number: row.table_number,
            status: row.status,
            items,
            special_instructions: row.special_instructions,
            allergies: row.allergies.0,
            subtotal: parse_money(&row.subtotal, "subtotal")?,
            tax: parse_money(&row.tax, "tax")?,
            total: parse_money(&row.total, "total")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl Repository for OrderRepository {
    type Record = Order;
    type Create = OrderCreate;
    type Update = OrderUpdate;

    const COLLECTION: Collection = Collection::Orders;

    fn record_id(record: &Order) -> i64 {
        record.id
    }

    async fn find_all(&self, query: &ListQuery) -> RepoResult<Vec<Order>> {
        let mut builder = select_list(Self::COLLECTION, COLUMNS, query)?;
        let rows = builder
            .build_query_as::<OrderRow>()
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(|row| self.to_order(row)).collect()
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|row| self.to_order(row)).transpose()
    }

    async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        if data.table_number <= 0 {
            return Err(AppError::new(ErrorCode::TableNumberRequired).into());
        }
        if data.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty).into());
        }
        let items = encode_lines(&data.items).map_err(AppError::from)?;
        let id = snowflake_id();
        let now = now_millis();
        sqlx::query(
            "INSERT INTO orders (id, table_number, status, items, special_instructions, allergies, subtotal, tax, total, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(data.table_number)
        .bind(data.status)
        .bind(items)
        .bind(non_blank(data.special_instructions))
        .bind(Json(normalize_tags(&data.allergies)))
        .bind(data.subtotal.to_string())
        .bind(data.tax.to_string())
        .bind(data.total.to_string())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create order".into()))
    }

    /// With `expected_status` set the write is a compare-and-set on the
    /// status column; a concurrent change makes it a rejected transition.
    async fn update(&self, id: i64, data: OrderUpdate) -> RepoResult<Order> {
        let OrderUpdate {
            status,
            special_instructions,
            expected_status,
        } = data;
        let rows = sqlx::query(
            "UPDATE orders SET \
                status = COALESCE(?1, status), \
                special_instructions = CASE WHEN ?2 IS NULL THEN special_instructions ELSE NULLIF(TRIM(?2), '') END, \
                updated_at = ?3 \
             WHERE id = ?4 AND (?5 IS NULL OR status = ?5)",
        )
        .bind(status)
        .bind(special_instructions)
        .bind(now_millis())
        .bind(id)
        .bind(expected_status)
        .execute(&self.pool)
        .await?;
        if rows.rows_affected() == 0 {
            return Err(match (self.find_by_id(id).await?, expected_status) {
                (Some(current), Some(expected)) => {
                    tracing::warn!(
                        order_id = id,
                        expected = %expected,
                        actual = %current.status,
                        "Order status changed concurrently, transition rejected"
                    );
                    let err = TransitionError::Invalid {
                        from: current.status,
                        to: status.unwrap_or(current.status),
                    };
                    RepoError::Rejected(AppError::from(err).with_detail("expected", expected.as_str()))
                }
                _ => RepoError::NotFound {
                    collection: Self::COLLECTION,
                    id,
                },
            });
        }
        self.find_by_id(id).await?.ok_or(RepoError::NotFound {
            collection: Self::COLLECTION,
            id,
        })
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(rows.rows_affected() > 0)
    }
}
