//! Menu Item API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::types::Collection;

use crate::api::query::parse_list_query;
use crate::core::ServerState;
use crate::utils::AppResult;

const RESOURCE: Collection = Collection::MenuItems;

/// GET /api/menu-items - 获取菜品列表 (默认按创建时间升序)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let query = parse_list_query(RESOURCE, &params)?;
    let mut items = state.gateway.menu_items.list(&query).await?;
    if let Some(term) = params.get("search") {
        items.retain(|item| item.matches_search(term));
    }
    Ok(Json(items))
}

/// GET /api/menu-items/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = state.gateway.menu_items.get(id).await?;
    Ok(Json(item))
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.gateway.menu_items.insert(payload).await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/:id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.gateway.menu_items.update(id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    state.gateway.menu_items.delete(id).await?;
    Ok(Json(true))
}
