//! # Order Store
//!
//! In-memory, per-category lists of accepted orders.
//!
//! The only way in is [`OrderStore::submit`], which validates the order
//! first, so every stored order has passed the schema in effect when it was
//! submitted. Clearing a category drops its orders; nothing else mutates.
//!
//! The lock is `parking_lot` and is only held inside a single synchronous
//! call, never across an `.await`.

use std::sync::Arc;

use apilab_schema::{CompiledValidator, Verdict};
use parking_lot::RwLock;
use serde_json::Value;

use crate::category::{OrderCategory, ORDER_CATEGORY_COUNT};

/// An order that passed validation and was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    /// The order's `orderId` field, if it has one.
    pub order_id: Option<Value>,
    /// Length of the category list after the append.
    pub stored: usize,
}

/// Shared, cloneable handle to the order lists.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    lists: Arc<RwLock<[Vec<Value>; ORDER_CATEGORY_COUNT]>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `order` and append it to `category` if it passes.
    ///
    /// Validation runs before the lock is taken. A rejected order is returned
    /// as its failing [`Verdict`] and leaves the store untouched.
    pub fn submit(
        &self,
        category: OrderCategory,
        order: Value,
        validator: &CompiledValidator,
    ) -> Result<Accepted, Verdict> {
        let verdict = validator.validate(&order);
        if !verdict.is_valid() {
            return Err(verdict);
        }

        let order_id = order.get("orderId").cloned();
        let mut lists = self.lists.write();
        let list = &mut lists[category.index()];
        list.push(order);
        Ok(Accepted {
            order_id,
            stored: list.len(),
        })
    }

    /// Snapshot of the orders in `category`, oldest first.
    pub fn list(&self, category: OrderCategory) -> Vec<Value> {
        self.lists.read()[category.index()].clone()
    }

    /// Remove every order in `category`, returning how many were dropped.
    pub fn clear(&self, category: OrderCategory) -> usize {
        std::mem::take(&mut self.lists.write()[category.index()]).len()
    }

    pub fn len(&self, category: OrderCategory) -> usize {
        self.lists.read()[category.index()].len()
    }

    pub fn is_empty(&self, category: OrderCategory) -> bool {
        self.len(category) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> CompiledValidator {
        CompiledValidator::compile(&json!({
            "type": "object",
            "required": ["orderId", "amount"],
            "properties": {
                "orderId": { "type": "string" },
                "amount": { "type": "number" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn valid_order_is_stored_in_its_category() {
        let store = OrderStore::new();
        let order = json!({"orderId": "A1", "amount": 42});

        let accepted = store
            .submit(OrderCategory::Standard, order.clone(), &validator())
            .unwrap();
        assert_eq!(accepted.order_id, Some(json!("A1")));
        assert_eq!(accepted.stored, 1);

        assert_eq!(store.list(OrderCategory::Standard), vec![order]);
        assert!(store.is_empty(OrderCategory::Express));
        assert!(store.is_empty(OrderCategory::B2b));
    }

    #[test]
    fn invalid_order_is_not_stored() {
        let store = OrderStore::new();
        let verdict = store
            .submit(OrderCategory::Express, json!({"orderId": "A1"}), &validator())
            .unwrap_err();
        assert!(!verdict.is_valid());
        assert_eq!(verdict.errors().len(), 1);
        assert!(store.is_empty(OrderCategory::Express));
    }

    #[test]
    fn orders_keep_submission_order() {
        let store = OrderStore::new();
        let v = validator();
        for id in ["A1", "A2", "A3"] {
            store
                .submit(OrderCategory::B2b, json!({"orderId": id, "amount": 1}), &v)
                .unwrap();
        }
        let ids: Vec<Value> = store
            .list(OrderCategory::B2b)
            .into_iter()
            .map(|o| o["orderId"].clone())
            .collect();
        assert_eq!(ids, vec![json!("A1"), json!("A2"), json!("A3")]);
    }

    #[test]
    fn clear_empties_only_that_category() {
        let store = OrderStore::new();
        let v = validator();
        store
            .submit(OrderCategory::Standard, json!({"orderId": "S", "amount": 1}), &v)
            .unwrap();
        store
            .submit(OrderCategory::Express, json!({"orderId": "E", "amount": 1}), &v)
            .unwrap();

        assert_eq!(store.clear(OrderCategory::Standard), 1);
        assert!(store.list(OrderCategory::Standard).is_empty());
        assert_eq!(store.len(OrderCategory::Express), 1);
        assert_eq!(store.clear(OrderCategory::Standard), 0);
    }

    #[test]
    fn clones_share_the_same_lists() {
        let store = OrderStore::new();
        let handle = store.clone();
        store
            .submit(OrderCategory::Standard, json!({"orderId": "A1", "amount": 2}), &validator())
            .unwrap();
        assert_eq!(handle.len(OrderCategory::Standard), 1);
    }

    #[test]
    fn order_without_id_reports_none() {
        let store = OrderStore::new();
        let open = CompiledValidator::compile(&json!({"type": "object"})).unwrap();
        let accepted = store
            .submit(OrderCategory::Standard, json!({"note": "no id"}), &open)
            .unwrap();
        assert_eq!(accepted.order_id, None);
    }
}
