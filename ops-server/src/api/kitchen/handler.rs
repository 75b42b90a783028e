//! Kitchen API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::Order;
use shared::order::KitchenAction;

use crate::core::ServerState;
use crate::orders::KitchenTicket;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: KitchenAction,
}

/// GET /api/kitchen/orders - 未完成订单 (最新在前)
pub async fn queue(State(state): State<ServerState>) -> AppResult<Json<Vec<KitchenTicket>>> {
    let tickets = state.orders.kitchen_queue().await?;
    Ok(Json(tickets))
}

/// POST /api/kitchen/orders/:id/action - 执行厨房操作 (开始制作 / 出餐)
pub async fn apply_action(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ActionRequest>,
) -> AppResult<Json<Order>> {
    let order = state.orders.apply_action(id, payload.action).await?;
    Ok(Json(order))
}
