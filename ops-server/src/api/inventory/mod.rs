//! Inventory API 模块

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/summary", get(handler::summary))
        .route("/alerts", get(handler::alerts))
        .route(
            "/{id}",
            put(handler::update)
                .get(handler::get_by_id)
                .delete(handler::delete),
        )
}
