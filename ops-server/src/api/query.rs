//! 列表查询参数解析
//!
//! `?order_by=name&ascending=false&status=ready` → [`ListQuery`]
//!
//! - `order_by` / `ascending`: 排序列必须在集合白名单内
//! - `{column}=value`: 等值过滤
//! - `{column}_ne=value`: 不等过滤
//!
//! 一次只支持一个过滤条件。

use std::collections::HashMap;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::types::{Collection, FieldFilter, ListQuery, Ordering};

pub fn parse_list_query(
    collection: Collection,
    params: &HashMap<String, String>,
) -> AppResult<ListQuery> {
    let mut query = ListQuery::new();

    let ascending = match params.get("ascending").map(|v| v.as_str()) {
        None => None,
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        Some(other) => {
            return Err(invalid_param("ascending", other));
        }
    };

    if let Some(column) = params.get("order_by") {
        let ascending = ascending.unwrap_or(true);
        let order = Ordering::resolve(collection, column, ascending)
            .ok_or_else(|| invalid_param("order_by", column))?;
        query = query.order(order);
    } else if let Some(ascending) = ascending {
        let default = collection.default_ordering();
        query = query.order(Ordering {
            column: default.column,
            ascending,
        });
    }

    let mut filters = params.iter().filter_map(|(key, value)| {
        if let Some(column) = key.strip_suffix("_ne") {
            FieldFilter::not_eq(collection, column, value.clone())
        } else {
            FieldFilter::eq(collection, key, value.clone())
        }
    });
    if let Some(filter) = filters.next() {
        if filters.next().is_some() {
            return Err(AppError::with_message(
                ErrorCode::InvalidRequest,
                "only one filter parameter is supported",
            ));
        }
        query = query.filter(filter);
    }

    Ok(query)
}

fn invalid_param(name: &str, value: &str) -> AppError {
    AppError::with_message(
        ErrorCode::InvalidRequest,
        format!("invalid value {value:?} for {name}"),
    )
    .with_detail("field", name)
}
