//! Inventory API Handlers
//!
//! 库存状态 (good / low / critical) 由服务端根据库存量计算，请求体中的
//! `status` 字段会被忽略。

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use shared::stock::StockSummary;
use shared::types::{Collection, ListQuery};

use crate::api::query::parse_list_query;
use crate::core::ServerState;
use crate::utils::AppResult;

const RESOURCE: Collection = Collection::Inventory;

/// GET /api/inventory - 获取库存列表 (默认按食材名升序)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let query = parse_list_query(RESOURCE, &params)?;
    let items = state.gateway.inventory.list(&query).await?;
    Ok(Json(items))
}

/// GET /api/inventory/summary - 各状态数量
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<StockSummary>> {
    let items = state.gateway.inventory.list(&ListQuery::new()).await?;
    Ok(Json(StockSummary::from_records(&items)))
}

/// GET /api/inventory/alerts - 需要补货的食材 (critical / low)
pub async fn alerts(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryItem>>> {
    let mut items = state.gateway.inventory.list(&ListQuery::new()).await?;
    items.retain(|item| item.status.needs_attention());
    Ok(Json(items))
}

/// GET /api/inventory/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.gateway.inventory.get(id).await?;
    Ok(Json(item))
}

/// POST /api/inventory - 新增食材
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.gateway.inventory.insert(payload).await?;
    Ok(Json(item))
}

/// PUT /api/inventory/:id - 更新食材 (库存变化时重新计算状态)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<InventoryItem>> {
    let item = state.gateway.inventory.update(id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/inventory/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    state.gateway.inventory.delete(id).await?;
    Ok(Json(true))
}
