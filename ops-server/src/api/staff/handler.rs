//! Staff API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{AttendanceSummary, StaffMember, StaffMemberCreate, StaffMemberUpdate};
use shared::types::{Collection, ListQuery};

use crate::api::query::parse_list_query;
use crate::core::ServerState;
use crate::utils::AppResult;

const RESOURCE: Collection = Collection::Staff;

/// GET /api/staff - 员工列表 (默认按姓名升序，支持 ?status=present)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<StaffMember>>> {
    let query = parse_list_query(RESOURCE, &params)?;
    let members = state.gateway.staff.list(&query).await?;
    Ok(Json(members))
}

/// GET /api/staff/summary - 出勤统计
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<AttendanceSummary>> {
    let members = state.gateway.staff.list(&ListQuery::new()).await?;
    Ok(Json(AttendanceSummary::from_members(&members)))
}

/// GET /api/staff/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StaffMember>> {
    let member = state.gateway.staff.get(id).await?;
    Ok(Json(member))
}

/// POST /api/staff
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffMemberCreate>,
) -> AppResult<Json<StaffMember>> {
    let member = state.gateway.staff.insert(payload).await?;
    Ok(Json(member))
}

/// PUT /api/staff/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StaffMemberUpdate>,
) -> AppResult<Json<StaffMember>> {
    let member = state.gateway.staff.update(id, payload).await?;
    Ok(Json(member))
}

/// DELETE /api/staff/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    state.gateway.staff.delete(id).await?;
    Ok(Json(true))
}
