//! In-process role sessions
//!
//! A session is what one screen set does on top of the gateway: it keeps live
//! lists of the collections it shows and turns every backend result into a
//! notification. Failures are reported and swallowed; callers get `None`.
//!
//! | Role | Session | Live lists |
//! |------|---------|------------|
//! | admin | [`AdminSession`] | menu items, inventory, orders, staff |
//! | waiter | [`WaiterSession`] | menu items, orders |
//! | chef | [`KitchenSession`] | orders, inventory |
//!
//! Starting a session performs no credential check.

mod admin;
mod kitchen;
mod live;
mod waiter;

pub use admin::{AdminOverview, AdminSession, OrderCounts};
pub use kitchen::KitchenSession;
pub use live::LiveList;
pub use waiter::WaiterSession;

use std::sync::Arc;

use shared::error::AppResult;
use shared::models::{Role, RoleScreens};
use shared::notification::{Notification, NotificationSink};

use crate::core::ServerState;

/// Session for the role picked on the landing screen
pub enum Session {
    Admin(AdminSession),
    Waiter(WaiterSession),
    Kitchen(KitchenSession),
}

impl Session {
    pub async fn start(role: Role, state: &ServerState, sink: Arc<dyn NotificationSink>) -> Self {
        tracing::info!(role = %role, "Session started");
        match role {
            Role::Admin => Session::Admin(AdminSession::start(state, sink).await),
            Role::Waiter => Session::Waiter(WaiterSession::start(state, sink).await),
            Role::Chef => Session::Kitchen(KitchenSession::start(state, sink).await),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Session::Admin(_) => Role::Admin,
            Session::Waiter(_) => Role::Waiter,
            Session::Kitchen(_) => Role::Chef,
        }
    }

    /// Navigation for this session's role
    pub fn screens(&self) -> RoleScreens {
        self.role().into()
    }

    /// Drop all live subscriptions
    pub fn end(self) {
        let role = self.role();
        match self {
            Session::Admin(s) => s.end(),
            Session::Waiter(s) => s.end(),
            Session::Kitchen(s) => s.end(),
        }
        tracing::info!(role = %role, "Session ended");
    }
}

/// Report a backend result to the sink and swallow the error
fn report<T>(
    sink: &dyn NotificationSink,
    result: AppResult<T>,
    failure_title: &str,
    success: impl FnOnce(&T) -> Option<Notification>,
) -> Option<T> {
    match result {
        Ok(value) => {
            if let Some(notification) = success(&value) {
                sink.notify(notification);
            }
            Some(value)
        }
        Err(e) => {
            tracing::warn!(error = %e, code = ?e.code, "{failure_title}");
            sink.notify(Notification::error(failure_title, &e));
            None
        }
    }
}

fn success(description: &str) -> Option<Notification> {
    Some(Notification::info("Success", description))
}
