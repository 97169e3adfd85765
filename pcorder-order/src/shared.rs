use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use pcorder_catalog::PcModel;
use pcorder_core::{Card, CoreResult, Customer};

use crate::ledger::OrderLedger;
use crate::models::Order;
use crate::summary::{LedgerSummary, Ranked};

/// Cloneable handle to one ledger shared between tasks.
///
/// Mutations hold the write lock; queries hold the read lock and may run
/// alongside each other, but never observe a half-applied mutation.
#[derive(Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<OrderLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: OrderLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub async fn place_order(
        &self,
        customer: Customer,
        model: Arc<PcModel>,
        card: &Card,
    ) -> CoreResult<Order> {
        self.inner.write().await.place_order(customer, model, card)
    }

    pub async fn add_order(&self, order: Order) -> CoreResult<()> {
        self.inner.write().await.add_order(order)
    }

    pub async fn cancel(&self, order_id: &Uuid) -> bool {
        self.inner.write().await.cancel(order_id)
    }

    pub async fn fulfil(&self, order_id: &Uuid) -> bool {
        self.inner.write().await.fulfil(order_id)
    }

    pub async fn clear_all(&self) {
        self.inner.write().await.clear_all();
    }

    pub async fn get_order(&self, order_id: &Uuid) -> Option<Order> {
        self.inner.read().await.get_order(order_id).cloned()
    }

    /// Copy of every order in insertion order
    pub async fn snapshot(&self) -> Vec<Order> {
        self.inner.read().await.all_orders().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn largest_customer(&self) -> Option<Ranked<Customer>> {
        self.inner.read().await.largest_customer()
    }

    pub async fn most_ordered_model(&self) -> Option<Ranked<String>> {
        self.inner.read().await.most_ordered_model()
    }

    pub async fn most_ordered_part(&self) -> Option<Ranked<String>> {
        self.inner.read().await.most_ordered_part()
    }

    pub async fn summary(&self) -> LedgerSummary {
        self.inner.read().await.summary()
    }
}
