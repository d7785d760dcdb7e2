//! Order state machine
//!
//! ```text
//!            approve              reject
//!  pending ──────────▶ approved ──────────▶ rejected
//!     │                 │    ▲
//!     │ reject   verify │    │ unverify
//!     ▼                 ▼    │
//!  rejected        approved + verified_at
//! ```
//!
//! `verified` is a flag on approved orders only. Rejected is terminal.

use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    Approve,
    Reject,
    Verify,
    Unverify,
}

impl OrderAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Verify => "verify",
            Self::Unverify => "unverify",
        }
    }
}

/// Status plus verification flag, as read from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderState {
    pub status: OrderStatus,
    pub verified: bool,
}

impl From<&Order> for OrderState {
    fn from(order: &Order) -> Self {
        Self {
            status: order.status,
            verified: order.is_verified(),
        }
    }
}

fn refuse(code: ErrorCode, state: OrderState, action: OrderAction) -> AppError {
    AppError::new(code)
        .with_detail("status", state.status.as_str())
        .with_detail("verified", state.verified)
        .with_detail("action", action.as_str())
}

/// State after `action`, or the typed refusal; never touches the store
pub fn check_transition(state: OrderState, action: OrderAction) -> Result<OrderState, AppError> {
    use OrderAction::*;
    use OrderStatus::*;

    let next = match (state.status, action) {
        (Rejected, _) => return Err(refuse(ErrorCode::InvalidOrderTransition, state, action)),

        (Pending, Approve) => OrderState {
            status: Approved,
            verified: false,
        },
        (Pending | Approved, Reject) => OrderState {
            status: Rejected,
            verified: false,
        },
        (Pending, Verify) => return Err(refuse(ErrorCode::OrderNotApproved, state, action)),
        (Pending, Unverify) => return Err(refuse(ErrorCode::OrderNotVerified, state, action)),

        (Approved, Approve) => return Err(refuse(ErrorCode::OrderAlreadyApproved, state, action)),
        (Approved, Verify) if state.verified => {
            return Err(refuse(ErrorCode::OrderAlreadyVerified, state, action));
        }
        (Approved, Verify) => OrderState {
            status: Approved,
            verified: true,
        },
        (Approved, Unverify) if !state.verified => {
            return Err(refuse(ErrorCode::OrderNotVerified, state, action));
        }
        (Approved, Unverify) => OrderState {
            status: Approved,
            verified: false,
        },
    };
    Ok(next)
}
