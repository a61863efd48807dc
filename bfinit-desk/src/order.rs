//! Tagged order variant
//!
//! The two tabs carry differently shaped orders whose status lives under
//! different field names (`status` and `order_status`). [`Order`] wraps
//! both so every status read goes through [`Order::status`].

use shared::models::{ManualOrder, OnlineOrder};

use crate::status::OrderStatus;
use crate::store::Record;

#[derive(Debug, Clone, PartialEq)]
pub enum Order {
    Online(OnlineOrder),
    Manual(ManualOrder),
}

impl Order {
    /// Status of either shape
    pub fn status(&self) -> OrderStatus {
        match self {
            Order::Online(o) => OrderStatus::Online(o.status),
            Order::Manual(o) => OrderStatus::Manual(o.order_status),
        }
    }

    /// Write a status of the matching shape; `false` on a shape mismatch
    pub fn set_status(&mut self, status: OrderStatus) -> bool {
        match (self, status) {
            (Order::Online(o), OrderStatus::Online(s)) => {
                o.status = s;
                true
            }
            (Order::Manual(o), OrderStatus::Manual(s)) => {
                o.order_status = s;
                true
            }
            _ => false,
        }
    }
}

impl Record for Order {
    fn id(&self) -> &str {
        match self {
            Order::Online(o) => &o.id,
            Order::Manual(o) => &o.id,
        }
    }
}

impl From<OnlineOrder> for Order {
    fn from(order: OnlineOrder) -> Self {
        Order::Online(order)
    }
}

impl From<ManualOrder> for Order {
    fn from(order: ManualOrder) -> Self {
        Order::Manual(order)
    }
}

/// Status of an order, dispatched on the variant
pub fn status_of(order: &Order) -> OrderStatus {
    order.status()
}
