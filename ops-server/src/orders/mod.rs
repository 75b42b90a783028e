//! 订单模块
//!
//! 下单 (定价 + 校验) 与状态流转。纯规则在 `shared::order`，
//! 这里负责把规则和持久化网关串起来。

pub mod manager;

pub use manager::{KitchenTicket, OrdersManager};
