use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use pcorder_catalog::{ModelSpec, PcModel};
use pcorder_core::{Card, Customer};

/// Order status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Placed,
    Fulfilled,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Placed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Fulfilled => "FULFILLED",
            OrderStatus::Cancelled => "CANCELLED",
        };
        f.write_str(label)
    }
}

/// A single purchase of one PC model by one customer
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: Uuid,
    customer: Customer,
    model: Arc<PcModel>,
    card: Card,
    date_placed: DateTime<Utc>,
    status: OrderStatus,
}

impl Order {
    pub fn new(customer: Customer, model: Arc<PcModel>, card: Card) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer,
            model,
            card,
            date_placed: Utc::now(),
            status: OrderStatus::Placed,
        }
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn model(&self) -> &Arc<PcModel> {
        &self.model
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn date_placed(&self) -> DateTime<Utc> {
        self.date_placed
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_placed(&self) -> bool {
        self.status == OrderStatus::Placed
    }

    pub fn is_fulfilled(&self) -> bool {
        self.status == OrderStatus::Fulfilled
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }

    /// Transition: Placed → Cancelled. No-op otherwise.
    ///
    /// Returns whether the status changed.
    pub fn cancel(&mut self) -> bool {
        self.transition(OrderStatus::Cancelled)
    }

    /// Transition: Placed → Fulfilled. No-op otherwise.
    ///
    /// Returns whether the status changed.
    pub fn fulfil(&mut self) -> bool {
        self.transition(OrderStatus::Fulfilled)
    }

    fn transition(&mut self, next: OrderStatus) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = next;
        true
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.customer == other.customer
            && same_model(&self.model, &other.model)
            && self.date_placed == other.date_placed
    }
}

/// Presets compare by catalog identity; a custom build is only ever equal to
/// itself.
fn same_model(a: &Arc<PcModel>, b: &Arc<PcModel>) -> bool {
    match (a.as_preset(), b.as_preset()) {
        (Some(x), Some(y)) => x == y,
        _ => Arc::ptr_eq(a, b),
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order[customer={}, model={}, status={}, date={}]",
            self.customer,
            self.model.name(),
            self.status,
            self.date_placed.to_rfc3339()
        )
    }
}
