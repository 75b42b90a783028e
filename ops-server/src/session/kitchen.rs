//! Kitchen (chef) session: active order queue and inventory alerts

use std::sync::Arc;

use shared::models::{InventoryItem, Order};
use shared::notification::{Notification, NotificationSink};
use shared::order::KitchenAction;
use shared::stock::{StockStatus, StockSummary};
use shared::types::ListQuery;

use super::{LiveList, report};
use crate::core::ServerState;
use crate::db::repository::{InventoryRepository, OrderRepository};
use crate::orders::{KitchenTicket, OrdersManager};

pub struct KitchenSession {
    orders: LiveList<OrderRepository>,
    inventory: LiveList<InventoryRepository>,
    manager: OrdersManager,
    sink: Arc<dyn NotificationSink>,
}

impl KitchenSession {
    pub async fn start(state: &ServerState, sink: Arc<dyn NotificationSink>) -> Self {
        let orders = LiveList::open(
            state.gateway.orders.clone(),
            ListQuery::new(),
            "orders",
            sink.clone(),
        )
        .await;
        let inventory = LiveList::open(
            state.gateway.inventory.clone(),
            ListQuery::new(),
            "inventory",
            sink.clone(),
        )
        .await;
        Self {
            orders,
            inventory,
            manager: state.orders.clone(),
            sink,
        }
    }

    pub fn orders(&self) -> &LiveList<OrderRepository> {
        &self.orders
    }

    pub fn inventory(&self) -> &LiveList<InventoryRepository> {
        &self.inventory
    }

    /// Active orders, newest first, each with the button the kitchen may press
    pub fn queue(&self) -> Vec<KitchenTicket> {
        let policy = self.manager.policy();
        self.orders
            .snapshot()
            .into_iter()
            .filter(|order| order.status.is_active())
            .map(|order| KitchenTicket::new(order, &policy))
            .collect()
    }

    pub async fn press(&self, order_id: i64, action: KitchenAction) -> Option<Order> {
        let result = self.manager.apply_action(order_id, action).await;
        report(self.sink.as_ref(), result, "Error updating order", |order| {
            Some(Notification::info(
                "Order Updated",
                format!("Order marked as {}", order.status),
            ))
        })
    }

    /// Critical items first, then low; alphabetical within each group
    pub fn inventory_alerts(&self) -> Vec<InventoryItem> {
        let mut items: Vec<InventoryItem> = self
            .inventory
            .snapshot()
            .into_iter()
            .filter(|item| item.status.needs_attention())
            .collect();
        items.sort_by_key(|item| item.status != StockStatus::Critical);
        items
    }

    pub fn stock_summary(&self) -> StockSummary {
        StockSummary::from_records(&self.inventory.snapshot())
    }

    pub fn end(self) {
        self.orders.close();
        self.inventory.close();
    }
}
