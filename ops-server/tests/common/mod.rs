#![allow(dead_code)]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use ops_server::{Config, ServerState};
use parking_lot::Mutex;
use shared::models::{
    AttendanceStatus, InventoryItemCreate, MenuItemCreate, OrderLine, StaffMemberCreate,
};
use shared::notification::{Notification, NotificationSink};
use shared::order::OrderSubmission;

pub async fn test_state() -> ServerState {
    state_with(|_| {}).await
}

pub async fn state_with(configure: impl FnOnce(&mut Config)) -> ServerState {
    let mut config = Config::for_tests();
    configure(&mut config);
    ServerState::in_memory(config)
        .await
        .expect("in-memory state should initialize")
}

pub fn menu_item(name: &str, price: &str, category: &str, allergens: &[&str]) -> MenuItemCreate {
    MenuItemCreate {
        name: name.into(),
        price: price.parse().expect("valid price"),
        category: category.into(),
        ingredients: None,
        allergens: allergens.iter().map(|a| a.to_string()).collect(),
        available: true,
    }
}

pub fn inventory(ingredient: &str, current_stock: f64, min_stock: f64) -> InventoryItemCreate {
    InventoryItemCreate {
        ingredient: ingredient.into(),
        current_stock,
        min_stock,
        unit: "kg".into(),
    }
}

pub fn staff(name: &str, status: AttendanceStatus) -> StaffMemberCreate {
    StaffMemberCreate {
        name: name.into(),
        role: "Waiter".into(),
        shift: "Evening".into(),
        contact: None,
        status,
    }
}

pub fn line(name: &str, quantity: u32, price: &str) -> OrderLine {
    OrderLine {
        name: name.into(),
        quantity,
        price: price.parse().expect("valid price"),
        ingredients: None,
    }
}

pub fn submission(table_number: Option<i32>, items: Vec<OrderLine>) -> OrderSubmission {
    OrderSubmission {
        table_number,
        items,
        special_instructions: None,
        allergies: Vec::new(),
    }
}

/// Poll `check` until it returns true or two seconds pass
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Sink that records every notification
#[derive(Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.seen.lock().iter().map(|n| n.title.clone()).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.seen.lock().clear();
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}
