use axum_helpers::{resolve_offset, PAGE_SIZE};
use domain_catalog::{Product, ProductRepository};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{field_error, OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderResponse, UpdateOrder};
use crate::repository::OrderRepository;

/// Service layer for Order business logic.
///
/// Resolves `product_ids` against the catalog (rejecting unknown ids on that
/// field) and renders responses with nested products and a computed total.
#[derive(Clone)]
pub struct OrderService<O: OrderRepository, P: ProductRepository> {
    orders: Arc<O>,
    products: Arc<P>,
}

impl<O: OrderRepository, P: ProductRepository> OrderService<O, P> {
    pub fn new(orders: O, products: P) -> Self {
        Self {
            orders: Arc::new(orders),
            products: Arc::new(products),
        }
    }

    pub async fn create_order(&self, input: CreateOrder) -> OrderResult<OrderResponse> {
        input.validate().map_err(OrderError::Validation)?;

        let products = self.resolve_products(&input.product_ids).await?;

        let order = self.orders.insert(Order::new(input.product_ids)).await?;
        Ok(OrderResponse::new(&order, products))
    }

    pub async fn get_order(&self, id: Uuid) -> OrderResult<OrderResponse> {
        let order = self
            .orders
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        let products = self.fetch_products(&order.product_ids).await?;
        Ok(OrderResponse::new(&order, products))
    }

    /// List one page of orders, returning the page rows and total count
    pub async fn list_orders(&self, page: u64) -> OrderResult<(Vec<OrderResponse>, u64)> {
        let count = self.orders.count().await?;
        let offset = resolve_offset(page, PAGE_SIZE, count).ok_or(OrderError::PageNotFound)?;
        let orders = self.orders.list(offset, PAGE_SIZE).await?;

        // One catalog lookup for every product on the page
        let all_ids: Vec<Uuid> = {
            let mut ids: Vec<Uuid> = orders.iter().flat_map(|o| o.product_ids.clone()).collect();
            ids.sort();
            ids.dedup();
            ids
        };
        let by_id: HashMap<Uuid, Product> = self
            .fetch_products(&all_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let responses = orders
            .iter()
            .map(|order| {
                let products = order
                    .product_ids
                    .iter()
                    .filter_map(|id| by_id.get(id).cloned())
                    .collect();
                OrderResponse::new(order, products)
            })
            .collect();

        Ok((responses, count))
    }

    /// Partial update: a present `product_ids` replaces the set wholesale,
    /// absent leaves it untouched.
    pub async fn update_order(&self, id: Uuid, input: UpdateOrder) -> OrderResult<OrderResponse> {
        input.validate().map_err(OrderError::Validation)?;

        let mut order = self
            .orders
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        if let Some(ref ids) = input.product_ids {
            self.resolve_products(ids).await?;
        }

        order.apply_update(input);
        let order = self.orders.update(order).await?;

        let products = self.fetch_products(&order.product_ids).await?;
        Ok(OrderResponse::new(&order, products))
    }

    pub async fn delete_order(&self, id: Uuid) -> OrderResult<()> {
        let deleted = self.orders.delete(id).await?;

        if !deleted {
            return Err(OrderError::NotFound(id));
        }

        Ok(())
    }

    /// Resolve product ids, failing on the `product_ids` field when any id
    /// is unknown.
    async fn resolve_products(&self, ids: &[Uuid]) -> OrderResult<Vec<Product>> {
        let mut unique: Vec<Uuid> = ids.to_vec();
        unique.sort();
        unique.dedup();

        let products = self.fetch_products(&unique).await?;

        if products.len() != unique.len() {
            let found: HashSet<Uuid> = products.iter().map(|p| p.id).collect();
            let missing: Vec<String> = unique
                .iter()
                .filter(|id| !found.contains(id))
                .map(|id| id.to_string())
                .collect();

            return Err(field_error(
                "product_ids",
                "does_not_exist",
                format!("invalid product ids: {}", missing.join(", ")),
            ));
        }

        Ok(products)
    }

    /// Fetch products without existence enforcement (reads tolerate products
    /// deleted after the order was placed).
    async fn fetch_products(&self, ids: &[Uuid]) -> OrderResult<Vec<Product>> {
        self.products
            .find_by_ids(ids)
            .await
            .map_err(|e| OrderError::Internal(e.to_string()))
    }
}
