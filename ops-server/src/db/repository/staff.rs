//! Staff Repository

use super::query::select_list;
use super::{RepoError, RepoResult, Repository};
use shared::models::{StaffMember, StaffMemberCreate, StaffMemberUpdate};
use shared::types::{Collection, ListQuery};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, role, shift, contact, status, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct StaffRepository {
    pool: SqlitePool,
}

impl StaffRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository for StaffRepository {
    type Record = StaffMember;
    type Create = StaffMemberCreate;
    type Update = StaffMemberUpdate;

    const COLLECTION: Collection = Collection::Staff;

    fn record_id(record: &StaffMember) -> i64 {
        record.id
    }

    async fn find_all(&self, query: &ListQuery) -> RepoResult<Vec<StaffMember>> {
        let mut builder = select_list(Self::COLLECTION, COLUMNS, query)?;
        let members = builder
            .build_query_as::<StaffMember>()
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<StaffMember>> {
        let member = sqlx::query_as::<_, StaffMember>(&format!(
            "SELECT {COLUMNS} FROM staff WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }

    async fn create(&self, data: StaffMemberCreate) -> RepoResult<StaffMember> {
        let data = data.normalized()?;
        let id = snowflake_id();
        let now = now_millis();
        sqlx::query(
            "INSERT INTO staff (id, name, role, shift, contact, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.role)
        .bind(&data.shift)
        .bind(&data.contact)
        .bind(data.status)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create staff member".into()))
    }

    async fn update(&self, id: i64, data: StaffMemberUpdate) -> RepoResult<StaffMember> {
        let data = data.normalized()?;
        let rows = sqlx::query(
            "UPDATE staff SET \
                name = COALESCE(?1, name), \
                role = COALESCE(?2, role), \
                shift = COALESCE(?3, shift), \
                contact = CASE WHEN ?4 IS NULL THEN contact ELSE NULLIF(?4, '') END, \
                status = COALESCE(?5, status), \
                updated_at = ?6 \
             WHERE id = ?7",
        )
        .bind(data.name)
        .bind(data.role)
        .bind(data.shift)
        .bind(data.contact)
        .bind(data.status)
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
        let rows = sqlx::query("DELETE FROM staff WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(rows.rows_affected() > 0)
    }
}
