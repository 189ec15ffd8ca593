use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::Order;

#[cfg(test)]
use mockall::automock;

/// Repository trait for Order persistence.
///
/// Stores the order record and its product id set; product rows themselves
/// are resolved by the service through the catalog domain.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order together with its product associations
    async fn insert(&self, order: Order) -> OrderResult<Order>;

    /// Get an order by ID
    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>>;

    /// List orders in stable id order
    async fn list(&self, offset: u64, limit: u64) -> OrderResult<Vec<Order>>;

    /// Total number of orders
    async fn count(&self) -> OrderResult<u64>;

    /// Persist changes to an existing order; the product association set is
    /// replaced with exactly `order.product_ids`
    async fn update(&self, order: Order) -> OrderResult<Order>;

    /// Delete an order by ID
    async fn delete(&self, id: Uuid) -> OrderResult<bool>;
}

/// In-memory implementation of OrderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: Order) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());

        tracing::info!(order_id = %order.id, "Created order");
        Ok(order)
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await;

        let mut result: Vec<Order> = orders.values().cloned().collect();
        result.sort_by_key(|o| o.id);

        Ok(result
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> OrderResult<u64> {
        Ok(self.orders.read().await.len() as u64)
    }

    async fn update(&self, order: Order) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());

        tracing::info!(order_id = %order.id, "Updated order");
        Ok(order)
    }

    async fn delete(&self, id: Uuid) -> OrderResult<bool> {
        let mut orders = self.orders.write().await;

        if orders.remove(&id).is_some() {
            tracing::info!(order_id = %id, "Deleted order");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get_order() {
        let repo = InMemoryOrderRepository::new();
        let product_id = Uuid::now_v7();

        let created = repo.insert(Order::new(vec![product_id])).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.product_ids, vec![product_id]);
    }

    #[tokio::test]
    async fn test_delete_missing_order_reports_false() {
        let repo = InMemoryOrderRepository::new();
        assert!(!repo.delete(Uuid::now_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let repo = InMemoryOrderRepository::new();

        for _ in 0..6 {
            repo.insert(Order::new(vec![])).await.unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 6);
        assert_eq!(repo.list(0, 5).await.unwrap().len(), 5);
        assert_eq!(repo.list(5, 5).await.unwrap().len(), 1);
    }
}
