//! Change feed 推送
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/changes/ws | GET | WebSocket 变更推送 (`?collection=orders`) |
//! | /api/changes/versions | GET | 各集合当前版本号 |
//!
//! 协议 (Server → Client，均为 JSON 文本帧的 `ChangeEvent`):
//! - 连接建立后，每个订阅的集合先收到一条 `resync`，客户端据此拉取全量列表
//! - 之后每次写入成功推送 `created` / `updated` / `deleted`
//! - 推送落后超过频道容量时再次收到 `resync`
//!
//! 服务器关闭时发送 Close 帧。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/changes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/ws", get(handler::handle_ws))
        .route("/versions", get(handler::versions))
}
