//! In-memory order store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use drive_thru_core::{Order, OrderId, UserId};

use super::{NewOrder, OrderStore, StoreError};

/// Orders kept in process memory, keyed by id.
///
/// Ids start at 1 and are never reused, even after a cancellation.
#[derive(Debug)]
pub struct MemoryOrderStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    orders: BTreeMap<OrderId, Order>,
    next_id: OrderId,
}

impl MemoryOrderStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                orders: BTreeMap::new(),
                next_id: OrderId::FIRST,
            }),
        }
    }
}

impl Default for MemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id = id.next();

        let order = Order {
            id,
            total_items: order.total_items(),
            user_id: order.user_id,
            items: order.items,
            created_at: Utc::now(),
        };
        inner.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.inner.read().await.orders.values().cloned().collect())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .orders
            .values()
            .filter(|order| order.user_id.as_ref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn remove(&self, id: OrderId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.orders.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use drive_thru_core::{MenuItem, OrderItem};

    use super::*;

    fn new_order(user: Option<&str>, quantity: u32) -> NewOrder {
        NewOrder {
            user_id: user.map(|u| UserId::parse(u).unwrap()),
            items: vec![OrderItem {
                item: MenuItem::Burgers,
                quantity,
            }],
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryOrderStore::new();

        let first = store.insert(new_order(None, 2)).await.unwrap();
        let second = store.insert(new_order(None, 1)).await.unwrap();

        assert_eq!(first.id, OrderId::FIRST);
        assert_eq!(second.id, OrderId::new(2));
        assert_eq!(first.total_items, 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_remove() {
        let store = MemoryOrderStore::new();
        let first = store.insert(new_order(None, 1)).await.unwrap();

        assert!(store.remove(first.id).await.unwrap());
        let second = store.insert(new_order(None, 1)).await.unwrap();

        assert_eq!(second.id, OrderId::new(2));
    }

    #[tokio::test]
    async fn test_remove_missing_order() {
        let store = MemoryOrderStore::new();
        assert!(!store.remove(OrderId::new(42)).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_for_user_filters() {
        let store = MemoryOrderStore::new();
        store.insert(new_order(Some("u1"), 1)).await.unwrap();
        store.insert(new_order(Some("u2"), 2)).await.unwrap();
        store.insert(new_order(None, 3)).await.unwrap();
        store.insert(new_order(Some("u1"), 4)).await.unwrap();

        let u1 = UserId::parse("u1").unwrap();
        let orders = store.list_for_user(&u1).await.unwrap();

        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.user_id.as_ref() == Some(&u1)));
        assert_eq!(orders[0].id, OrderId::FIRST);
        assert_eq!(store.list().await.unwrap().len(), 4);
    }
}
