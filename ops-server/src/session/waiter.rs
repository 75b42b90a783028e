//! Waiter session: menu browsing, cart, order submission

use std::collections::BTreeSet;
use std::sync::Arc;

use shared::error::AppError;
use shared::models::{MenuItem, Order};
use shared::notification::{Notification, NotificationSink};
use shared::order::{OrderDraft, PriceBreakdown};
use shared::types::ListQuery;

use super::{LiveList, report};
use crate::core::ServerState;
use crate::db::repository::{MenuItemRepository, OrderRepository};
use crate::orders::OrdersManager;

pub struct WaiterSession {
    menu: LiveList<MenuItemRepository>,
    orders: LiveList<OrderRepository>,
    manager: OrdersManager,
    draft: OrderDraft,
    sink: Arc<dyn NotificationSink>,
}

impl WaiterSession {
    pub async fn start(state: &ServerState, sink: Arc<dyn NotificationSink>) -> Self {
        let menu = LiveList::open(
            state.gateway.menu_items.clone(),
            ListQuery::new(),
            "menu items",
            sink.clone(),
        )
        .await;
        let orders = LiveList::open(
            state.gateway.orders.clone(),
            ListQuery::new(),
            "orders",
            sink.clone(),
        )
        .await;
        Self {
            menu,
            orders,
            manager: state.orders.clone(),
            draft: OrderDraft::new(),
            sink,
        }
    }

    pub fn menu(&self) -> &LiveList<MenuItemRepository> {
        &self.menu
    }

    pub fn orders(&self) -> &LiveList<OrderRepository> {
        &self.orders
    }

    /// Menu filtered by category ("All" or `None` for every category) and search term
    pub fn browse(&self, category: Option<&str>, search: &str) -> Vec<MenuItem> {
        self.menu
            .snapshot()
            .into_iter()
            .filter(|item| match category {
                None | Some("All") => true,
                Some(c) => item.category == c,
            })
            .filter(|item| item.matches_search(search))
            .collect()
    }

    pub fn categories(&self) -> BTreeSet<String> {
        self.menu
            .snapshot()
            .into_iter()
            .map(|item| item.category)
            .collect()
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Add one unit of a menu item; returns the new line quantity
    pub fn add_item(&mut self, menu_item_id: i64) -> Option<u32> {
        let Some(item) = self.menu.find(|item| item.id == menu_item_id) else {
            self.sink.notify(Notification::info(
                "Item not found",
                "The menu item is no longer on the menu",
            ));
            return None;
        };
        match self.draft.add_item(&item) {
            Ok(quantity) => {
                self.sink.notify(Notification::info(
                    "Added to order",
                    "Item added to cart successfully",
                ));
                Some(quantity)
            }
            Err(e) => {
                self.sink
                    .notify(Notification::error("Cannot add item", &AppError::from(e)));
                None
            }
        }
    }

    pub fn remove_item(&mut self, menu_item_id: i64) -> bool {
        self.draft.remove_item(menu_item_id)
    }

    /// Cart totals; `None` (with a toast) when a line is out of range
    pub fn quote(&self) -> Option<PriceBreakdown> {
        let result = self.manager.quote(&self.draft.to_order_lines());
        report(self.sink.as_ref(), result, "Error pricing order", |_| None)
    }

    /// Allergen warning text for the cart, `None` when no line carries allergens
    pub fn allergen_warning(&self) -> Option<String> {
        let allergens = self.draft.allergen_union();
        if allergens.is_empty() {
            return None;
        }
        let list: Vec<&str> = allergens.iter().map(String::as_str).collect();
        Some(format!("This order contains: {}", list.join(", ")))
    }

    /// Submit the cart. The cart is cleared only after the insert succeeds.
    pub async fn submit(
        &mut self,
        table_number: Option<i32>,
        special_instructions: Option<String>,
        allergy_note: &str,
    ) -> Option<Order> {
        let submission = match self
            .draft
            .submission(table_number, special_instructions, allergy_note)
        {
            Ok(submission) => submission,
            Err(e) => {
                self.sink
                    .notify(Notification::error("Error creating order", &AppError::from(e)));
                return None;
            }
        };

        let result = self.manager.submit(submission).await;
        let order = report(self.sink.as_ref(), result, "Error creating order", |order| {
            Some(Notification::info(
                "Order Submitted",
                format!(
                    "Order for Table {} has been sent to the kitchen",
                    order.table_number
                ),
            ))
        })?;
        self.draft.clear();
        Some(order)
    }

    pub fn end(self) {
        self.menu.close();
        self.orders.close();
    }
}
