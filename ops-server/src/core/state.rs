use std::sync::Arc;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::gateway::PersistenceGateway;
use crate::message::ChangeFeed;
use crate::orders::OrdersManager;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 内部 Arc 实现浅拷贝，可直接作为 axum State。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Arc<Config> | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | feed | ChangeFeed | 变更通知频道 |
/// | gateway | PersistenceGateway | 四个集合的 CRUD + 订阅 |
/// | orders | OrdersManager | 下单与状态流转 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub feed: ChangeFeed,
    pub gateway: PersistenceGateway,
    pub orders: OrdersManager,
}

impl ServerState {
    /// 打开数据库文件并组装所有服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        let path = config.database_path();
        let db = DbService::new(&path.to_string_lossy()).await?;
        Ok(Self::with_db(config.clone(), db))
    }

    /// 内存数据库 (测试用)
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory().await?;
        Ok(Self::with_db(config, db))
    }

    pub fn with_db(config: Config, db: DbService) -> Self {
        let feed = ChangeFeed::new(config.change_feed_capacity);
        let gateway = PersistenceGateway::new(db.pool.clone(), feed.clone(), config.decode_policy);
        let orders = OrdersManager::new(
            gateway.orders.clone(),
            config.tax_rate,
            config.transition_policy,
        );
        tracing::info!(
            tax_rate = %config.tax_rate.value(),
            kitchen_can_complete = config.transition_policy.allow_completion,
            decode_policy = ?config.decode_policy,
            "Server state initialized"
        );
        Self {
            config: Arc::new(config),
            db,
            feed,
            gateway,
            orders,
        }
    }

    /// 停止所有订阅任务和 WebSocket 变更流
    pub fn shutdown(&self) {
        self.feed.shutdown();
    }
}
