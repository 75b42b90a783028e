//! Order API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{Order, OrderLine};
use shared::order::{OrderStatus, OrderSubmission, PriceBreakdown};
use shared::types::Collection;

use crate::api::query::parse_list_query;
use crate::core::ServerState;
use crate::utils::AppResult;

const RESOURCE: Collection = Collection::Orders;

/// Body for `POST /api/orders/:id/advance`
#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub status: OrderStatus,
}

/// GET /api/orders - 订单列表 (默认最新在前，支持 ?status=)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Order>>> {
    let query = parse_list_query(RESOURCE, &params)?;
    let orders = state.gateway.orders.list(&query).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = state.gateway.orders.get(id).await?;
    Ok(Json(order))
}

/// POST /api/orders - 下单 (服务端定价，状态为 pending)
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<OrderSubmission>,
) -> AppResult<Json<Order>> {
    let order = state.orders.submit(payload).await?;
    Ok(Json(order))
}

/// POST /api/orders/quote - 按当前税率试算金额，不落库
pub async fn quote(
    State(state): State<ServerState>,
    Json(lines): Json<Vec<OrderLine>>,
) -> AppResult<Json<PriceBreakdown>> {
    Ok(Json(state.orders.quote(&lines)?))
}

/// POST /api/orders/:id/advance - 状态流转
pub async fn advance(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AdvanceRequest>,
) -> AppResult<Json<Order>> {
    let order = state.orders.advance(id, payload.status).await?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    state.gateway.orders.delete(id).await?;
    Ok(Json(true))
}
