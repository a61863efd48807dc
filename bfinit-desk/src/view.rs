//! Table rows as display-ready cells
//!
//! Formatting lives here so the console (or any other front end) only
//! joins strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{ManualOrder, OnlineOrder, PaymentOrder, PaymentStatus};

use crate::order::Order;
use crate::row::{RowEditor, RowNotice};
use crate::status::{EditableStatus, OrderStatus};

pub const ONLINE_COLUMNS: [&str; 7] = [
    "Order", "Domain", "Customer", "Date", "Total", "Payment", "Status",
];

pub const MANUAL_COLUMNS: [&str; 8] = [
    "Customer", "Email", "Phone", "Package", "Price", "Duration", "Date", "Status",
];

pub const PAYMENT_COLUMNS: [&str; 8] = [
    "Order", "Name", "Email", "Software", "Duration", "Price", "Payment", "Status",
];

const MISSING: &str = "N/A";

/// One status option as shown in the select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    /// Wire value, accepted back by the `select` command
    pub value: String,
    pub label: &'static str,
    pub selected: bool,
    pub disabled: bool,
}

/// Status cell: select, confirm/cancel buttons and the last notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusControl {
    pub current: &'static str,
    pub options: Vec<OptionView>,
    pub show_confirm: bool,
    pub disabled: bool,
    pub notice: Option<String>,
}

impl StatusControl {
    pub fn from_editor<S: EditableStatus>(editor: &RowEditor<S>) -> Self {
        let options = editor
            .options()
            .into_iter()
            .map(|o| OptionView {
                value: o.value.to_string(),
                label: o.label,
                selected: o.selected,
                disabled: o.disabled,
            })
            .collect();
        let notice = editor.notice().map(|n| match n {
            RowNotice::Updated(m) => m.clone(),
            RowNotice::Failed(m) => format!("Failed: {}", m),
        });
        Self {
            current: editor.displayed().label(),
            options,
            show_confirm: editor.shows_controls(),
            disabled: editor.is_disabled(),
            notice,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub cells: Vec<String>,
    pub status: StatusControl,
}

/// Render an order row of either shape
pub fn order_row(order: &Order, editor: &RowEditor<OrderStatus>) -> RowView {
    let cells = match order {
        Order::Online(o) => online_cells(o),
        Order::Manual(o) => manual_cells(o),
    };
    RowView {
        id: editor.id().to_string(),
        cells,
        status: StatusControl::from_editor(editor),
    }
}

pub fn payment_row(payment: &PaymentOrder, editor: &RowEditor<PaymentStatus>) -> RowView {
    let currency = payment.currency.as_deref().unwrap_or("$");
    let cells = vec![
        text(payment.order_id.as_deref()),
        text(payment.name.as_deref()),
        text(payment.email.as_deref()),
        text(payment.software.as_deref()),
        months(payment.duration.as_deref()),
        money(currency, payment.price),
        payment_method_label(payment.payment_type.as_deref()),
    ];
    RowView {
        id: editor.id().to_string(),
        cells,
        status: StatusControl::from_editor(editor),
    }
}

fn online_cells(order: &OnlineOrder) -> Vec<String> {
    let number = order.order_number.as_deref().unwrap_or(&order.id);
    let customer = order
        .user
        .as_ref()
        .and_then(|u| u.name.as_deref().or(u.email.as_deref()));
    vec![
        format!("#{}", number),
        text(order.domain.as_deref()),
        text(customer),
        format_date(order.created_at),
        money(&order.currency, order.total()),
        payment_method_label(order.payment_type()),
    ]
}

fn manual_cells(order: &ManualOrder) -> Vec<String> {
    vec![
        text(order.full_name.as_deref()),
        text(order.email.as_deref()),
        text(order.phone.as_deref()),
        text(order.package_name.as_deref()),
        money("$", order.package_price),
        months(order.duration.as_deref()),
        format_date(order.created_at),
    ]
}

/// Short date, e.g. "Oct 1, 2025"
pub fn format_date(at: Option<DateTime<Utc>>) -> String {
    at.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Amount with two decimals behind its currency
pub fn money(currency: &str, amount: Decimal) -> String {
    if currency == "$" {
        format!("${:.2}", amount)
    } else {
        format!("{} {:.2}", currency, amount)
    }
}

/// Human name of a payment method
pub fn payment_method_label(method: Option<&str>) -> String {
    let Some(method) = method.map(str::trim).filter(|m| !m.is_empty()) else {
        return MISSING.to_string();
    };
    let label = match method.to_ascii_lowercase().as_str() {
        "bank" => "Bank Transfer",
        "bkash" => "bKash",
        "nagad" => "Nagad",
        "rocket" => "Rocket",
        "card" => "Card",
        "stripe" => "Stripe",
        "paypal" => "PayPal",
        _ => return method.to_string(),
    };
    label.to_string()
}

fn months(duration: Option<&str>) -> String {
    match duration.map(str::trim).filter(|d| !d.is_empty()) {
        Some("1") => "1 month".to_string(),
        Some(d) => format!("{} months", d),
        None => MISSING.to_string(),
    }
}

fn text(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}
