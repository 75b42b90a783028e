//! Role picker 路由
//!
//! 仅用于导航：返回角色可访问的页面列表，不做任何身份校验。

use axum::{
    Json, Router,
    extract::Path,
    routing::get,
};
use shared::models::{Role, RoleScreens};

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/roles", get(list))
        .route("/api/roles/{role}", get(get_by_role))
}

/// GET /api/roles
pub async fn list() -> Json<Vec<RoleScreens>> {
    Json(Role::ALL.into_iter().map(RoleScreens::from).collect())
}

/// GET /api/roles/:role
pub async fn get_by_role(Path(role): Path<String>) -> AppResult<Json<RoleScreens>> {
    let role: Role = role.parse()?;
    Ok(Json(role.into()))
}
