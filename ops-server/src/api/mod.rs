//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`roles`] - 角色导航
//! - [`menu_items`] - 菜单管理
//! - [`inventory`] - 库存管理
//! - [`orders`] - 下单与订单状态
//! - [`kitchen`] - 厨房队列
//! - [`staff`] - 员工与出勤
//! - [`changes`] - WebSocket 变更推送

pub mod middleware;
pub mod query;

pub mod changes;
pub mod health;
pub mod roles;

// Collection APIs
pub mod inventory;
pub mod kitchen;
pub mod menu_items;
pub mod orders;
pub mod staff;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(roles::router())
        .merge(menu_items::router())
        .merge(inventory::router())
        .merge(orders::router())
        .merge(kitchen::router())
        .merge(staff::router())
        .merge(changes::router())
}

/// Routes + middleware + state; used by the HTTP server and by in-process tests
pub fn build_app(state: ServerState) -> Router {
    health::mark_started();
    build_router()
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}
