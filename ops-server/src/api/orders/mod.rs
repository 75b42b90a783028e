//! Order API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::submit))
        .route("/quote", post(handler::quote))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/advance", post(handler::advance))
}
