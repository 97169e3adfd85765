use serde::Serialize;
use std::collections::HashMap;

use pcorder_catalog::ModelSpec;
use pcorder_core::Customer;
use pcorder_shared::{compare_ignore_case, normalize_key};

use crate::models::{Order, OrderStatus};

/// Winner of a ranking query together with how often it occurred
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<K> {
    pub key: K,
    pub count: usize,
}

/// Snapshot of the ledger for reporting
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSummary {
    pub total_orders: usize,
    pub placed: usize,
    pub fulfilled: usize,
    pub cancelled: usize,
    pub largest_customer: Option<Ranked<Customer>>,
    pub most_ordered_model: Option<Ranked<String>>,
    pub most_ordered_part: Option<Ranked<String>>,
}

/// Frequency table keyed by a grouping key, remembering the first display
/// value seen for each group.
struct Tally<K> {
    buckets: HashMap<String, (K, usize)>,
}

impl<K> Tally<K> {
    fn new() -> Self {
        Self {
            buckets: HashMap::new(),
        }
    }

    fn record(&mut self, group: String, display: impl FnOnce() -> K) {
        self.buckets.entry(group).or_insert_with(|| (display(), 0)).1 += 1;
    }

    /// Highest count wins; ties go to the alphabetically first label
    /// (case-insensitive), then to the grouping key.
    fn top(self, label: impl Fn(&K) -> String) -> Option<Ranked<K>> {
        self.buckets
            .into_iter()
            .min_by(|(group_a, (key_a, count_a)), (group_b, (key_b, count_b))| {
                count_b
                    .cmp(count_a)
                    .then_with(|| compare_ignore_case(&label(key_a), &label(key_b)))
                    .then_with(|| group_a.cmp(group_b))
            })
            .map(|(_, (key, count))| Ranked { key, count })
    }
}

fn fulfilled(orders: &[Order]) -> impl Iterator<Item = &Order> {
    orders.iter().filter(|o| o.status() == OrderStatus::Fulfilled)
}

/// Customer with the most fulfilled orders
pub fn largest_customer(orders: &[Order]) -> Option<Ranked<Customer>> {
    let mut tally = Tally::new();
    for order in fulfilled(orders) {
        let customer = order.customer();
        let (first, last) = customer.identity_key();
        tally.record(format!("{}\u{1f}{}", first, last), || customer.clone());
    }
    tally.top(|c| c.full_name())
}

/// Most fulfilled preset model, keyed "<manufacturer> - <name>"
pub fn most_ordered_model(orders: &[Order]) -> Option<Ranked<String>> {
    let mut tally = Tally::new();
    for order in fulfilled(orders) {
        if let Some(preset) = order.model().as_preset() {
            let key = preset.catalog_key();
            tally.record(normalize_key(&key), || key.clone());
        }
    }
    tally.top(|k| k.clone())
}

/// Most frequent part across fulfilled custom builds. Every occurrence
/// counts, so a part listed twice in one build counts twice.
pub fn most_ordered_part(orders: &[Order]) -> Option<Ranked<String>> {
    let mut tally = Tally::new();
    for order in fulfilled(orders) {
        if let Some(custom) = order.model().as_custom() {
            for part in custom.parts() {
                tally.record(part.clone(), || part.clone());
            }
        }
    }
    tally.top(|k| k.clone())
}

pub fn summarize(orders: &[Order]) -> LedgerSummary {
    let count = |status: OrderStatus| orders.iter().filter(|o| o.status() == status).count();

    LedgerSummary {
        total_orders: orders.len(),
        placed: count(OrderStatus::Placed),
        fulfilled: count(OrderStatus::Fulfilled),
        cancelled: count(OrderStatus::Cancelled),
        largest_customer: largest_customer(orders),
        most_ordered_model: most_ordered_model(orders),
        most_ordered_part: most_ordered_part(orders),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_prefers_higher_count() {
        let mut tally = Tally::new();
        tally.record("b".to_string(), || "b".to_string());
        tally.record("b".to_string(), || "b".to_string());
        tally.record("a".to_string(), || "a".to_string());

        let top = tally.top(|k| k.clone()).unwrap();
        assert_eq!(top, Ranked { key: "b".to_string(), count: 2 });
    }

    #[test]
    fn test_tally_tie_break_ignores_case() {
        let mut tally = Tally::new();
        for key in ["zeta", "Beta", "alpha"] {
            tally.record(key.to_string(), || key.to_string());
        }

        let top = tally.top(|k| k.clone()).unwrap();
        assert_eq!(top.key, "alpha");
        assert_eq!(top.count, 1);
    }

    #[test]
    fn test_tally_keeps_first_display_value() {
        let mut tally = Tally::new();
        tally.record("dell - x1".to_string(), || "Dell - X1".to_string());
        tally.record("dell - x1".to_string(), || "DELL - x1".to_string());

        let top = tally.top(|k| k.clone()).unwrap();
        assert_eq!(top.key, "Dell - X1");
        assert_eq!(top.count, 2);
    }

    #[test]
    fn test_empty_tally_has_no_winner() {
        let tally: Tally<String> = Tally::new();
        assert!(tally.top(|k| k.clone()).is_none());
        assert!(largest_customer(&[]).is_none());
        assert!(most_ordered_model(&[]).is_none());
        assert!(most_ordered_part(&[]).is_none());
    }
}
