//! Restaurant operations server
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx) 存储 + 四个集合的 Repository
//! - **变更频道** (`message`): 每个集合一个 broadcast 频道
//! - **持久化网关** (`gateway`): CRUD 写入成功后发布变更
//! - **订单** (`orders`): 下单定价与状态流转
//! - **会话** (`session`): admin / waiter / chef 三种角色的进程内会话
//! - **HTTP API** (`api`): RESTful 接口 + WebSocket 变更推送
//!
//! # 模块结构
//!
//! ```text
//! ops-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── db/            # 连接池、迁移、Repository
//! ├── message/       # 变更频道
//! ├── gateway/       # 持久化网关
//! ├── orders/        # 订单管理
//! ├── session/       # 角色会话
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod gateway;
pub mod message;
pub mod orders;
pub mod session;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use gateway::{CollectionGateway, PersistenceGateway};
pub use message::ChangeFeed;
pub use orders::OrdersManager;
pub use session::Session;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Install the logger from configuration (JSON output in production)
pub fn setup_environment(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.is_production()),
        config.log_dir.as_deref(),
    );
}

pub fn print_banner() {
    println!(
        r#"
  ___                 ____
 / _ \ _ __  ___     / ___|  ___ _ ____   _____ _ __
| | | | '_ \/ __|____\___ \ / _ \ '__\ \ / / _ \ '__|
| |_| | |_) \__ \_____|__) |  __/ |   \ V /  __/ |
 \___/| .__/|___/    |____/ \___|_|    \_/ \___|_|
      |_|                                    v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
