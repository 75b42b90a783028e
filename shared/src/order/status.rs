//! Order lifecycle
//!
//! ```text
//! pending ──▶ preparing ──▶ ready ──▶ completed
//! ```
//!
//! Forward-only, one step at a time. There is no cancel and no reverse edge.
//! `ready → completed` is part of the machine but only reachable when the
//! [`TransitionPolicy`] exposes it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
}

/// Which edges of the lifecycle are open to callers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPolicy {
    /// Expose `ready → completed`
    pub allow_completion: bool,
}

impl TransitionPolicy {
    pub const KITCHEN_ONLY: TransitionPolicy = TransitionPolicy {
        allow_completion: false,
    };

    pub const WITH_COMPLETION: TransitionPolicy = TransitionPolicy {
        allow_completion: true,
    };
}

/// Rejected transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("order is already completed")]
    AlreadyCompleted,

    #[error("cannot move order from {from} to {to}")]
    Invalid { from: OrderStatus, to: OrderStatus },

    #[error("completing ready orders is not enabled")]
    CompletionNotExposed,
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        let code = match &err {
            TransitionError::AlreadyCompleted => ErrorCode::OrderAlreadyCompleted,
            TransitionError::Invalid { .. } => ErrorCode::InvalidStatusTransition,
            TransitionError::CompletionNotExposed => ErrorCode::CompletionNotExposed,
        };
        let app = AppError::with_message(code, err.to_string());
        match err {
            TransitionError::Invalid { from, to } => app
                .with_detail("from", from.as_str())
                .with_detail("to", to.as_str()),
            _ => app,
        }
    }
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        }
    }

    /// Single forward successor, `None` for `completed`
    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    /// Shown on the kitchen queue
    pub const fn is_active(&self) -> bool {
        !matches!(self, OrderStatus::Completed)
    }

    /// Check `self → target` against the lifecycle and the policy.
    ///
    /// Returns the target on success so callers can chain into the write.
    pub fn validate_transition(
        &self,
        target: OrderStatus,
        policy: &TransitionPolicy,
    ) -> Result<OrderStatus, TransitionError> {
        if *self == OrderStatus::Completed {
            return Err(TransitionError::AlreadyCompleted);
        }
        if self.next() != Some(target) {
            return Err(TransitionError::Invalid {
                from: *self,
                to: target,
            });
        }
        if target == OrderStatus::Completed && !policy.allow_completion {
            return Err(TransitionError::CompletionNotExposed);
        }
        Ok(target)
    }

    /// Action button the kitchen view shows for this status
    pub fn kitchen_action(&self, policy: &TransitionPolicy) -> Option<KitchenAction> {
        match self {
            OrderStatus::Pending => Some(KitchenAction::StartPreparing),
            OrderStatus::Preparing => Some(KitchenAction::MarkReady),
            OrderStatus::Ready if policy.allow_completion => Some(KitchenAction::Complete),
            OrderStatus::Ready | OrderStatus::Completed => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("unknown order status: {other}"),
            )),
        }
    }
}

/// Kitchen view action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KitchenAction {
    StartPreparing,
    MarkReady,
    Complete,
}

impl KitchenAction {
    /// Status this action moves the order to
    pub const fn target(&self) -> OrderStatus {
        match self {
            KitchenAction::StartPreparing => OrderStatus::Preparing,
            KitchenAction::MarkReady => OrderStatus::Ready,
            KitchenAction::Complete => OrderStatus::Completed,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            KitchenAction::StartPreparing => "Start Preparing",
            KitchenAction::MarkReady => "Mark as Ready",
            KitchenAction::Complete => "Complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: TransitionPolicy = TransitionPolicy::KITCHEN_ONLY;

    #[test]
    fn test_forward_edges() {
        assert_eq!(
            OrderStatus::Pending.validate_transition(OrderStatus::Preparing, &DEFAULT),
            Ok(OrderStatus::Preparing)
        );
        assert_eq!(
            OrderStatus::Preparing.validate_transition(OrderStatus::Ready, &DEFAULT),
            Ok(OrderStatus::Ready)
        );
    }

    #[test]
    fn test_skipping_rejected() {
        assert_eq!(
            OrderStatus::Pending.validate_transition(OrderStatus::Ready, &DEFAULT),
            Err(TransitionError::Invalid {
                from: OrderStatus::Pending,
                to: OrderStatus::Ready,
            })
        );
        assert!(
            OrderStatus::Pending
                .validate_transition(OrderStatus::Completed, &TransitionPolicy::WITH_COMPLETION)
                .is_err()
        );
    }

    #[test]
    fn test_reverse_and_self_rejected() {
        assert!(
            OrderStatus::Ready
                .validate_transition(OrderStatus::Preparing, &DEFAULT)
                .is_err()
        );
        assert!(
            OrderStatus::Preparing
                .validate_transition(OrderStatus::Preparing, &DEFAULT)
                .is_err()
        );
    }

    #[test]
    fn test_completion_gated_by_policy() {
        assert_eq!(
            OrderStatus::Ready.validate_transition(OrderStatus::Completed, &DEFAULT),
            Err(TransitionError::CompletionNotExposed)
        );
        assert_eq!(
            OrderStatus::Ready
                .validate_transition(OrderStatus::Completed, &TransitionPolicy::WITH_COMPLETION),
            Ok(OrderStatus::Completed)
        );
    }

    #[test]
    fn test_completed_is_terminal() {
        assert_eq!(OrderStatus::Completed.next(), None);
        assert_eq!(
            OrderStatus::Completed
                .validate_transition(OrderStatus::Pending, &TransitionPolicy::WITH_COMPLETION),
            Err(TransitionError::AlreadyCompleted)
        );
    }

    #[test]
    fn test_kitchen_actions() {
        assert_eq!(
            OrderStatus::Pending.kitchen_action(&DEFAULT),
            Some(KitchenAction::StartPreparing)
        );
        assert_eq!(
            OrderStatus::Preparing.kitchen_action(&DEFAULT),
            Some(KitchenAction::MarkReady)
        );
        assert_eq!(OrderStatus::Ready.kitchen_action(&DEFAULT), None);
        assert_eq!(
            OrderStatus::Ready.kitchen_action(&TransitionPolicy::WITH_COMPLETION),
            Some(KitchenAction::Complete)
        );
        assert_eq!(KitchenAction::MarkReady.target(), OrderStatus::Ready);
    }

    #[test]
    fn test_error_codes() {
        let err: AppError = TransitionError::CompletionNotExposed.into();
        assert_eq!(err.code, ErrorCode::CompletionNotExposed);
        let err: AppError = TransitionError::Invalid {
            from: OrderStatus::Pending,
            to: OrderStatus::Ready,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        assert_eq!(err.message, "cannot move order from pending to ready");
    }

    #[test]
    fn test_active() {
        assert!(OrderStatus::Ready.is_active());
        assert!(!OrderStatus::Completed.is_active());
    }
}
