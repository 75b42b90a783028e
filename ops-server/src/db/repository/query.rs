//! List query builder
//!
//! Column names only ever come from the per-collection whitelists in
//! [`shared::types`]; values are always bound.

use shared::error::{AppError, ErrorCode};
use shared::types::{Collection, FieldFilter, ListQuery, Ordering};
use sqlx::{QueryBuilder, Sqlite};

use super::{RepoError, RepoResult};

/// Money columns are stored as decimal strings
const MONEY_COLUMNS: &[&str] = &["price", "subtotal", "tax", "total"];
const BOOL_COLUMNS: &[&str] = &["available"];
const INT_COLUMNS: &[&str] = &["table_number"];

/// `SELECT {columns} FROM {table} [WHERE ..] ORDER BY .., id ..`
pub fn select_list<'a>(
    collection: Collection,
    columns: &str,
    query: &'a ListQuery,
) -> RepoResult<QueryBuilder<'a, Sqlite>> {
    let mut builder = QueryBuilder::new(format!("SELECT {columns} FROM {}", collection.name()));

    if let Some(filter) = &query.filter {
        push_filter(&mut builder, filter)?;
    }

    let order = query.effective_order(collection);
    builder.push(" ORDER BY ");
    builder.push(order_clause(&order));

    Ok(builder)
}

fn order_clause(order: &Ordering) -> String {
    let dir = order.direction();
    let expr = if MONEY_COLUMNS.contains(&order.column) {
        format!("CAST({} AS REAL)", order.column)
    } else {
        order.column.to_string()
    };
    // id breaks ties in the same direction (snowflake ids follow insert order)
    format!("{expr} {dir}, id {dir}")
}

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a FieldFilter) -> RepoResult<()> {
    let op = if filter.negate { " <> " } else { " = " };
    builder.push(" WHERE ");
    builder.push(filter.column);
    builder.push(op);

    if BOOL_COLUMNS.contains(&filter.column) {
        let value = match filter.value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => return Err(bad_filter_value(filter)),
        };
        builder.push_bind(value);
    } else if INT_COLUMNS.contains(&filter.column) {
        let value: i64 = filter
            .value
            .trim()
            .parse()
            .map_err(|_| bad_filter_value(filter))?;
        builder.push_bind(value);
    } else {
        builder.push_bind(filter.value.as_str());
    }
    Ok(())
}

fn bad_filter_value(filter: &FieldFilter) -> RepoError {
    RepoError::Rejected(
        AppError::with_message(
            ErrorCode::InvalidRequest,
            format!("invalid value {:?} for filter on {}", filter.value, filter.column),
        )
        .with_detail("field", filter.column),
    )
}
