//! OrdersManager - order submission and lifecycle
//!
//! # Submit Flow
//!
//! ```text
//! submit(submission)
//!     ├─ 1. Validate (table number, non-empty lines)
//!     ├─ 2. Price lines with the configured tax rate
//!     ├─ 3. Insert through the gateway with status `pending`
//!     └─ 4. Gateway publishes `created` on the orders channel
//! ```
//!
//! # Advance Flow
//!
//! ```text
//! advance(id, target)
//!     ├─ 1. Load current order
//!     ├─ 2. Validate transition against the policy
//!     ├─ 3. Update status through the gateway
//!     └─ 4. Gateway publishes `updated`
//! ```

use serde::Serialize;
use shared::error::AppResult;
use shared::models::{Order, OrderCreate, OrderLine, OrderUpdate};
use shared::order::{
    KitchenAction, OrderStatus, OrderSubmission, PriceBreakdown, TaxRate, TransitionPolicy,
    price_lines,
};
use shared::types::{Collection, FieldFilter, ListQuery};
use shared::util::{non_blank, normalize_tags};

use crate::db::repository::OrderRepository;
use crate::gateway::CollectionGateway;

/// Active order as shown on the kitchen screen
#[derive(Debug, Clone, Serialize)]
pub struct KitchenTicket {
    #[serde(flatten)]
    pub order: Order,
    /// Button to show, `None` when the kitchen has nothing to do
    pub action: Option<KitchenAction>,
    pub action_label: Option<&'static str>,
}

impl KitchenTicket {
    pub fn new(order: Order, policy: &TransitionPolicy) -> Self {
        let action = order.status.kitchen_action(policy);
        Self {
            order,
            action,
            action_label: action.map(|a| a.label()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrdersManager {
    orders: CollectionGateway<OrderRepository>,
    tax_rate: TaxRate,
    policy: TransitionPolicy,
}

impl OrdersManager {
    pub fn new(
        orders: CollectionGateway<OrderRepository>,
        tax_rate: TaxRate,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            orders,
            tax_rate,
            policy,
        }
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Totals for a set of lines at the configured rate
    pub fn quote(&self, lines: &[OrderLine]) -> AppResult<PriceBreakdown> {
        Ok(price_lines(lines, self.tax_rate)?)
    }

    /// Validate, price and insert a new `pending` order
    pub async fn submit(&self, submission: OrderSubmission) -> AppResult<Order> {
        submission.validate()?;
        let OrderSubmission {
            table_number,
            items,
            special_instructions,
            allergies,
        } = submission;

        let breakdown = self.quote(&items)?;
        let create = OrderCreate {
            // validate() guarantees a positive table number
            table_number: table_number.unwrap_or_default(),
            status: OrderStatus::Pending,
            items,
            special_instructions: non_blank(special_instructions),
            allergies: normalize_tags(&allergies),
            subtotal: breakdown.subtotal,
            tax: breakdown.tax,
            total: breakdown.total,
        };

        let order = self.orders.insert(create).await?;
        tracing::info!(
            order_id = order.id,
            table = order.table_number,
            total = %order.total,
            lines = order.items.len(),
            "Order submitted"
        );
        Ok(order)
    }

    /// Move an order one step along its lifecycle
    pub async fn advance(&self, id: i64, target: OrderStatus) -> AppResult<Order> {
        let current = self.orders.get(id).await?;
        let next = current.status.validate_transition(target, &self.policy)?;
        let order = self
            .orders
            .update(
                id,
                OrderUpdate {
                    status: Some(next),
                    special_instructions: None,
                    expected_status: Some(current.status),
                },
            )
            .await?;
        tracing::info!(order_id = id, from = %current.status, to = %next, "Order status advanced");
        Ok(order)
    }

    /// Apply a kitchen button press
    pub async fn apply_action(&self, id: i64, action: KitchenAction) -> AppResult<Order> {
        self.advance(id, action.target()).await
    }

    /// Non-completed orders, newest first, with their kitchen action
    pub async fn kitchen_queue(&self) -> AppResult<Vec<KitchenTicket>> {
        let mut query = ListQuery::new();
        if let Some(filter) = FieldFilter::not_eq(
            Collection::Orders,
            "status",
            OrderStatus::Completed.as_str(),
        ) {
            query = query.filter(filter);
        }
        let orders = self.orders.list(&query).await?;
        Ok(orders
            .into_iter()
            .filter(|o| o.status.is_active())
            .map(|order| KitchenTicket::new(order, &self.policy))
            .collect())
    }
}
