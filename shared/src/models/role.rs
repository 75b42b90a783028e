//! Role picker
//!
//! Maps an operator role to the screen set it may navigate. This is a
//! navigation aid only: there is no credential check behind it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};

/// Operator role selected on the landing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Waiter,
    Chef,
}

/// A screen reachable from a role's navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    AdminDashboard,
    MenuManagement,
    InventoryManagement,
    Reports,
    StaffManagement,
    WaiterMenu,
    WaiterOrders,
    KitchenOrders,
    InventoryAlerts,
}

impl Screen {
    /// Client-side route path
    pub const fn path(&self) -> &'static str {
        match self {
            Screen::AdminDashboard => "/admin",
            Screen::MenuManagement => "/admin/menu",
            Screen::InventoryManagement => "/admin/inventory",
            Screen::Reports => "/admin/reports",
            Screen::StaffManagement => "/admin/staff",
            Screen::WaiterMenu => "/waiter",
            Screen::WaiterOrders => "/waiter/orders",
            Screen::KitchenOrders => "/chef",
            Screen::InventoryAlerts => "/chef/inventory",
        }
    }
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Waiter, Role::Chef];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Waiter => "waiter",
            Role::Chef => "chef",
        }
    }

    /// Screens in navigation order; the first one is the landing screen
    pub const fn screens(&self) -> &'static [Screen] {
        match self {
            Role::Admin => &[
                Screen::AdminDashboard,
                Screen::MenuManagement,
                Screen::InventoryManagement,
                Screen::Reports,
                Screen::StaffManagement,
            ],
            Role::Waiter => &[Screen::WaiterMenu, Screen::WaiterOrders],
            Role::Chef => &[Screen::KitchenOrders, Screen::InventoryAlerts],
        }
    }

    pub const fn home(&self) -> Screen {
        self.screens()[0]
    }

    pub fn can_access(&self, screen: Screen) -> bool {
        self.screens().contains(&screen)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "waiter" => Ok(Role::Waiter),
            "chef" => Ok(Role::Chef),
            other => Err(AppError::with_message(
                ErrorCode::InvalidRequest,
                format!("unknown role: {other}"),
            )),
        }
    }
}

/// Role picker entry returned by the roles endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleScreens {
    pub role: Role,
    pub home: String,
    pub screens: Vec<ScreenEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenEntry {
    pub screen: Screen,
    pub path: String,
}

impl From<Role> for RoleScreens {
    fn from(role: Role) -> Self {
        Self {
            role,
            home: role.home().path().to_string(),
            screens: role
                .screens()
                .iter()
                .map(|s| ScreenEntry {
                    screen: *s,
                    path: s.path().to_string(),
                })
                .collect(),
        }
    }
}
