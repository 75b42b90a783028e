use std::path::PathBuf;

use shared::order::{LineDecodePolicy, TaxRate, TransitionPolicy};

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (支持 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | DATABASE_PATH | {WORK_DIR}/ops.db | SQLite 数据库文件 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录，设置后按天滚动写文件 |
/// | TAX_RATE | 0.10 | 税率，取值 [0, 1] |
/// | KITCHEN_CAN_COMPLETE | false | 是否开放 ready → completed |
/// | ORDER_ITEMS_DECODE | lenient | 订单明细解码策略 (lenient / strict) |
/// | CHANGE_FEED_CAPACITY | 256 | 每个集合变更频道的容量 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时 (毫秒) |
///
/// 非法值会回退到默认值并记录 warn 日志。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/ops HTTP_PORT=8080 TAX_RATE=0.13 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// 数据库路径 (None 时使用 {work_dir}/ops.db)
    pub database_path: Option<String>,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 税率
    pub tax_rate: TaxRate,
    /// 订单状态流转策略
    pub transition_policy: TransitionPolicy,
    /// 订单明细解码策略
    pub decode_policy: LineDecodePolicy,
    /// 变更频道容量
    pub change_feed_capacity: usize,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

/// Read an env var and parse it, warning and falling back on bad input
fn env_parse<T, F>(key: &str, default: T, parse: F) -> T
where
    F: FnOnce(&str) -> Option<T>,
{
    match std::env::var(key) {
        Ok(raw) => match parse(&raw) {
            Some(v) => v,
            None => {
                tracing::warn!(key, value = %raw, "Invalid configuration value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            database_path: std::env::var("DATABASE_PATH").ok().filter(|p| !p.is_empty()),
            http_port: env_parse("HTTP_PORT", 3000, |p| p.trim().parse().ok()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            tax_rate: env_parse("TAX_RATE", TaxRate::DEFAULT, |r| r.parse().ok()),
            transition_policy: TransitionPolicy {
                allow_completion: env_parse("KITCHEN_CAN_COMPLETE", false, parse_bool),
            },
            decode_policy: env_parse("ORDER_ITEMS_DECODE", LineDecodePolicy::Lenient, |p| {
                p.parse().ok()
            }),
            change_feed_capacity: env_parse("CHANGE_FEED_CAPACITY", 256, |c| {
                c.trim().parse().ok().filter(|n: &usize| *n > 0)
            }),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10000, |t| t.trim().parse().ok()),
        }
    }

    /// 测试用配置：不读环境变量，使用全部默认值
    pub fn for_tests() -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            database_path: None,
            http_port: 0,
            environment: "test".into(),
            log_level: "debug".into(),
            log_dir: None,
            tax_rate: TaxRate::DEFAULT,
            transition_policy: TransitionPolicy::default(),
            decode_policy: LineDecodePolicy::default(),
            change_feed_capacity: 256,
            shutdown_timeout_ms: 1000,
        }
    }

    /// 数据库文件路径
    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(&self.work_dir).join("ops.db"),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
