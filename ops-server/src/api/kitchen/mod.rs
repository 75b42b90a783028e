//! Kitchen API 模块
//!
//! 厨房视图：未完成订单 + 当前可执行的操作按钮。

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::queue))
        .route("/orders/{id}/action", post(handler::apply_action))
}
