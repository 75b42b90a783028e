//! Admin session: dashboard figures and CRUD over every collection

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{
    AttendanceSummary, InventoryItem, InventoryItemCreate, InventoryItemUpdate, MenuItem,
    MenuItemCreate, MenuItemUpdate, StaffMember, StaffMemberCreate, StaffMemberUpdate,
};
use shared::notification::NotificationSink;
use shared::order::OrderStatus;
use shared::stock::StockSummary;
use shared::types::ListQuery;

use super::{LiveList, report, success};
use crate::core::ServerState;
use crate::db::repository::{
    InventoryRepository, MenuItemRepository, OrderRepository, StaffRepository,
};
use crate::gateway::PersistenceGateway;

/// Order counts per lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderCounts {
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
    pub completed: usize,
}

/// Dashboard figures computed from the live lists
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminOverview {
    pub menu_items: usize,
    pub available_menu_items: usize,
    pub stock: StockSummary,
    pub orders: OrderCounts,
    #[serde(with = "rust_decimal::serde::float")]
    pub completed_revenue: Decimal,
    pub attendance: AttendanceSummary,
}

pub struct AdminSession {
    menu: LiveList<MenuItemRepository>,
    inventory: LiveList<InventoryRepository>,
    orders: LiveList<OrderRepository>,
    staff: LiveList<StaffRepository>,
    gateway: PersistenceGateway,
    sink: Arc<dyn NotificationSink>,
}

impl AdminSession {
    pub async fn start(state: &ServerState, sink: Arc<dyn NotificationSink>) -> Self {
        let gateway = state.gateway.clone();
        Self {
            menu: LiveList::open(
                gateway.menu_items.clone(),
                ListQuery::new(),
                "menu items",
                sink.clone(),
            )
            .await,
            inventory: LiveList::open(
                gateway.inventory.clone(),
                ListQuery::new(),
                "inventory",
                sink.clone(),
            )
            .await,
            orders: LiveList::open(
                gateway.orders.clone(),
                ListQuery::new(),
                "orders",
                sink.clone(),
            )
            .await,
            staff: LiveList::open(
                gateway.staff.clone(),
                ListQuery::new(),
                "staff",
                sink.clone(),
            )
            .await,
            gateway,
            sink,
        }
    }

    pub fn menu(&self) -> &LiveList<MenuItemRepository> {
        &self.menu
    }

    pub fn inventory(&self) -> &LiveList<InventoryRepository> {
        &self.inventory
    }

    pub fn orders(&self) -> &LiveList<OrderRepository> {
        &self.orders
    }

    pub fn staff(&self) -> &LiveList<StaffRepository> {
        &self.staff
    }

    pub fn overview(&self) -> AdminOverview {
        let menu = self.menu.snapshot();
        let orders = self.orders.snapshot();

        let mut counts = OrderCounts::default();
        let mut completed_revenue = Decimal::ZERO;
        for order in &orders {
            match order.status {
                OrderStatus::Pending => counts.pending += 1,
                OrderStatus::Preparing => counts.preparing += 1,
                OrderStatus::Ready => counts.ready += 1,
                OrderStatus::Completed => {
                    counts.completed += 1;
                    completed_revenue += order.total;
                }
            }
        }

        AdminOverview {
            menu_items: menu.len(),
            available_menu_items: menu.iter().filter(|m| m.available).count(),
            stock: StockSummary::from_records(&self.inventory.snapshot()),
            orders: counts,
            completed_revenue,
            attendance: AttendanceSummary::from_members(&self.staff.snapshot()),
        }
    }

    // ========== Menu ==========

    pub async fn add_menu_item(&self, data: MenuItemCreate) -> Option<MenuItem> {
        let result = self.gateway.menu_items.insert(data).await;
        report(self.sink.as_ref(), result, "Error adding menu item", |_| {
            success("Menu item added successfully")
        })
    }

    pub async fn update_menu_item(&self, id: i64, data: MenuItemUpdate) -> Option<MenuItem> {
        let result = self.gateway.menu_items.update(id, data).await;
        report(self.sink.as_ref(), result, "Error updating menu item", |_| {
            success("Menu item updated successfully")
        })
    }

    pub async fn delete_menu_item(&self, id: i64) -> bool {
        let result = self.gateway.menu_items.delete(id).await;
        report(self.sink.as_ref(), result, "Error deleting menu item", |_| {
            success("Menu item deleted successfully")
        })
        .is_some()
    }

    // ========== Inventory ==========

    pub async fn add_inventory_item(&self, data: InventoryItemCreate) -> Option<InventoryItem> {
        let result = self.gateway.inventory.insert(data).await;
        report(self.sink.as_ref(), result, "Error adding inventory item", |_| {
            success("Inventory item added successfully")
        })
    }

    pub async fn update_inventory_item(
        &self,
        id: i64,
        data: InventoryItemUpdate,
    ) -> Option<InventoryItem> {
        let result = self.gateway.inventory.update(id, data).await;
        report(self.sink.as_ref(), result, "Error updating inventory", |_| {
            success("Inventory updated successfully")
        })
    }

    pub async fn delete_inventory_item(&self, id: i64) -> bool {
        let result = self.gateway.inventory.delete(id).await;
        report(self.sink.as_ref(), result, "Error deleting inventory item", |_| {
            success("Inventory item deleted successfully")
        })
        .is_some()
    }

    // ========== Staff ==========

    pub async fn add_staff(&self, data: StaffMemberCreate) -> Option<StaffMember> {
        let result = self.gateway.staff.insert(data).await;
        report(self.sink.as_ref(), result, "Error adding staff member", |_| {
            success("Staff member added successfully")
        })
    }

    pub async fn update_staff(&self, id: i64, data: StaffMemberUpdate) -> Option<StaffMember> {
        let result = self.gateway.staff.update(id, data).await;
        report(self.sink.as_ref(), result, "Error updating staff member", |_| {
            success("Staff member updated successfully")
        })
    }

    pub async fn delete_staff(&self, id: i64) -> bool {
        let result = self.gateway.staff.delete(id).await;
        report(self.sink.as_ref(), result, "Error deleting staff member", |_| {
            success("Staff member deleted successfully")
        })
        .is_some()
    }

    // ========== Orders ==========

    pub async fn delete_order(&self, id: i64) -> bool {
        let result = self.gateway.orders.delete(id).await;
        report(self.sink.as_ref(), result, "Error deleting order", |_| {
            success("Order deleted successfully")
        })
        .is_some()
    }

    pub fn end(self) {
        self.menu.close();
        self.inventory.close();
        self.orders.close();
        self.staff.close();
    }
}
