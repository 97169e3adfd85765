use std::sync::Arc;
use uuid::Uuid;

use pcorder_catalog::{ModelSpec, PcModel};
use pcorder_core::{Card, CoreError, CoreResult, Customer};

use crate::models::{Order, OrderStatus};
use crate::summary::{self, LedgerSummary, Ranked};

/// Owns every order placed during a run and manages its lifecycle.
///
/// Orders are kept in insertion order and never removed individually;
/// only [`OrderLedger::clear_all`] empties the ledger.
#[derive(Debug, Default)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Place an order paid with `card`.
    ///
    /// The card is checked once, here. A card that expires later does not
    /// affect orders it already paid for.
    pub fn place_order(
        &mut self,
        customer: Customer,
        model: Arc<PcModel>,
        card: &Card,
    ) -> CoreResult<Order> {
        if !card.is_valid() {
            tracing::warn!(
                card = %card.masked_number(),
                customer = %customer,
                "Rejected order: card is not valid"
            );
            return Err(CoreError::InvalidPayment(format!(
                "card {} is not valid",
                card.masked_number()
            )));
        }

        let order = Order::new(customer, model, card.clone());
        tracing::info!(
            order_id = %order.id,
            customer = %order.customer(),
            model = order.model().name(),
            "Order placed"
        );

        self.orders.push(order.clone());
        Ok(order)
    }

    /// Insert an order built elsewhere
    pub fn add_order(&mut self, order: Order) -> CoreResult<()> {
        if self.orders.iter().any(|o| o.id == order.id) {
            return Err(CoreError::ValidationError(format!(
                "Order {} is already in the ledger",
                order.id
            )));
        }
        self.orders.push(order);
        Ok(())
    }

    pub fn get_order(&self, order_id: &Uuid) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == *order_id)
    }

    pub fn all_orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Transition: Placed → Cancelled.
    ///
    /// Returns false when the order is unknown or already settled.
    pub fn cancel(&mut self, order_id: &Uuid) -> bool {
        self.transition(order_id, OrderStatus::Cancelled)
    }

    /// Transition: Placed → Fulfilled.
    ///
    /// Returns false when the order is unknown or already settled.
    pub fn fulfil(&mut self, order_id: &Uuid) -> bool {
        self.transition(order_id, OrderStatus::Fulfilled)
    }

    pub fn clear_all(&mut self) {
        tracing::debug!(cleared = self.orders.len(), "Ledger cleared");
        self.orders.clear();
    }

    pub fn largest_customer(&self) -> Option<Ranked<Customer>> {
        summary::largest_customer(&self.orders)
    }

    pub fn most_ordered_model(&self) -> Option<Ranked<String>> {
        summary::most_ordered_model(&self.orders)
    }

    pub fn most_ordered_part(&self) -> Option<Ranked<String>> {
        summary::most_ordered_part(&self.orders)
    }

    pub fn summary(&self) -> LedgerSummary {
        summary::summarize(&self.orders)
    }

    fn transition(&mut self, order_id: &Uuid, to: OrderStatus) -> bool {
        let Some(order) = self.orders.iter_mut().find(|o| o.id == *order_id) else {
            tracing::debug!(%order_id, %to, "Transition ignored: unknown order");
            return false;
        };

        let from = order.status();
        if from.is_terminal() {
            tracing::debug!(%order_id, %from, %to, "Transition ignored: order already settled");
            return false;
        }

        let changed = match to {
            OrderStatus::Cancelled => order.cancel(),
            OrderStatus::Fulfilled => order.fulfil(),
            OrderStatus::Placed => false,
        };
        if changed {
            tracing::debug!(%order_id, %from, %to, "Order transitioned");
        }
        changed
    }
}
