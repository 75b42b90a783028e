//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 简单健康检查 |
//! | /health/detailed | GET | 数据库 + 变更频道检查 |

use std::time::{Instant, SystemTime};

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use shared::types::Collection;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
}

#[derive(Serialize)]
pub struct DetailedHealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    checks: HealthChecks,
    /// 各集合当前版本号
    versions: Vec<CollectionVersion>,
}

#[derive(Serialize)]
pub struct HealthChecks {
    database: CheckResult,
    change_feed: CheckResult,
}

#[derive(Serialize)]
pub struct CollectionVersion {
    collection: Collection,
    version: u64,
    subscribers: usize,
}

#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    latency_ms: Option<u64>,
    message: Option<String>,
}

impl CheckResult {
    fn ok(latency_ms: Option<u64>) -> Self {
        Self {
            status: "ok",
            latency_ms,
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            latency_ms: None,
            message: Some(message.into()),
        }
    }
}

static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

/// 首次调用时记录启动时间
pub fn mark_started() {
    START_TIME.get_or_init(SystemTime::now);
}

fn uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
    })
}

pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealthResponse> {
    let db_start = Instant::now();
    let database = match state.db.ping().await {
        Ok(()) => CheckResult::ok(Some(db_start.elapsed().as_millis() as u64)),
        Err(e) => CheckResult::error(e.message),
    };

    let change_feed = if state.feed.shutdown_token().is_cancelled() {
        CheckResult::error("change feed is shut down")
    } else {
        CheckResult::ok(None)
    };

    let all_ok = database.status == "ok" && change_feed.status == "ok";
    let versions = Collection::ALL
        .into_iter()
        .map(|collection| CollectionVersion {
            collection,
            version: state.feed.version(collection),
            subscribers: state.feed.receiver_count(collection),
        })
        .collect();

    Json(DetailedHealthResponse {
        status: if all_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: uptime_seconds(),
        checks: HealthChecks {
            database,
            change_feed,
        },
        versions,
    })
}
