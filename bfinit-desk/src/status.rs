//! Status enumerations as seen by the row editor

use std::fmt;

use shared::models::{ManualStatus, OnlineStatus, PaymentStatus};

/// Status kinds a [`RowEditor`](crate::RowEditor) can drive
pub trait EditableStatus: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Every value the select offers, in display order
    fn options(&self) -> &'static [Self];

    fn label(&self) -> &'static str;

    /// Whether `to` may be chosen while `self` is persisted
    fn can_transition(&self, to: &Self) -> bool;

    /// A persisted value that allows no further edits
    fn is_locked(&self) -> bool {
        false
    }

    /// Once shown, no other value may be picked; only cancel goes back
    fn is_one_way(&self) -> bool {
        false
    }
}

impl EditableStatus for ManualStatus {
    fn options(&self) -> &'static [Self] {
        &ManualStatus::ALL
    }

    fn label(&self) -> &'static str {
        ManualStatus::label(self)
    }

    fn can_transition(&self, to: &Self) -> bool {
        self != to
    }
}

/// Online orders only move through the approve action.
impl EditableStatus for OnlineStatus {
    fn options(&self) -> &'static [Self] {
        &OnlineStatus::ALL
    }

    fn label(&self) -> &'static str {
        OnlineStatus::label(self)
    }

    fn can_transition(&self, to: &Self) -> bool {
        *self == OnlineStatus::Pending && *to == OnlineStatus::Completed
    }

    fn is_locked(&self) -> bool {
        *self != OnlineStatus::Pending
    }
}

/// Unpaid to paid, once.
impl EditableStatus for PaymentStatus {
    fn options(&self) -> &'static [Self] {
        &PaymentStatus::ALL
    }

    fn label(&self) -> &'static str {
        PaymentStatus::label(self)
    }

    fn can_transition(&self, to: &Self) -> bool {
        *self == PaymentStatus::Unpaid && *to == PaymentStatus::Paid
    }

    fn is_locked(&self) -> bool {
        *self == PaymentStatus::Paid
    }

    fn is_one_way(&self) -> bool {
        *self == PaymentStatus::Paid
    }
}

/// Status of an [`Order`](crate::Order), tagged by shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Online(OnlineStatus),
    Manual(ManualStatus),
}

const ONLINE_OPTIONS: [OrderStatus; 4] = [
    OrderStatus::Online(OnlineStatus::Pending),
    OrderStatus::Online(OnlineStatus::Processing),
    OrderStatus::Online(OnlineStatus::Completed),
    OrderStatus::Online(OnlineStatus::Cancelled),
];

const MANUAL_OPTIONS: [OrderStatus; 4] = [
    OrderStatus::Manual(ManualStatus::Pending),
    OrderStatus::Manual(ManualStatus::Processing),
    OrderStatus::Manual(ManualStatus::Completed),
    OrderStatus::Manual(ManualStatus::Cancle),
];

impl OrderStatus {
    pub fn bucket(&self) -> StatusBucket {
        match self {
            OrderStatus::Online(OnlineStatus::Pending)
            | OrderStatus::Manual(ManualStatus::Pending) => StatusBucket::Pending,
            OrderStatus::Online(OnlineStatus::Processing)
            | OrderStatus::Manual(ManualStatus::Processing) => StatusBucket::Processing,
            OrderStatus::Online(OnlineStatus::Completed)
            | OrderStatus::Manual(ManualStatus::Completed) => StatusBucket::Completed,
            OrderStatus::Online(OnlineStatus::Cancelled)
            | OrderStatus::Manual(ManualStatus::Cancle) => StatusBucket::Cancelled,
        }
    }

    /// Parse operator input for the same shape as `self`
    pub fn parse_like(&self, input: &str) -> Option<OrderStatus> {
        match self {
            OrderStatus::Online(_) => input.parse::<OnlineStatus>().ok().map(OrderStatus::Online),
            OrderStatus::Manual(_) => input.parse::<ManualStatus>().ok().map(OrderStatus::Manual),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Online(s) => fmt::Display::fmt(s, f),
            OrderStatus::Manual(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl EditableStatus for OrderStatus {
    fn options(&self) -> &'static [Self] {
        match self {
            OrderStatus::Online(_) => &ONLINE_OPTIONS,
            OrderStatus::Manual(_) => &MANUAL_OPTIONS,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            OrderStatus::Online(s) => EditableStatus::label(s),
            OrderStatus::Manual(s) => EditableStatus::label(s),
        }
    }

    fn can_transition(&self, to: &Self) -> bool {
        match (self, to) {
            (OrderStatus::Online(a), OrderStatus::Online(b)) => a.can_transition(b),
            (OrderStatus::Manual(a), OrderStatus::Manual(b)) => a.can_transition(b),
            _ => false,
        }
    }

    fn is_locked(&self) -> bool {
        match self {
            OrderStatus::Online(s) => s.is_locked(),
            OrderStatus::Manual(s) => s.is_locked(),
        }
    }

    fn is_one_way(&self) -> bool {
        match self {
            OrderStatus::Online(s) => s.is_one_way(),
            OrderStatus::Manual(s) => s.is_one_way(),
        }
    }
}

/// Summary bucket used by the stat counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBucket {
    Pending,
    Processing,
    Completed,
    Cancelled,
}
