use chrono::{DateTime, Utc};
use domain_catalog::{Product, ProductResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Order entity - a purchase record referencing a set of products
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    /// Unique identifier
    pub id: Uuid,
    /// Referenced products (set semantics, stored in the join relation)
    pub product_ids: Vec<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Order as rendered in API responses.
///
/// Products appear as nested objects sorted by title; `total` is the sum of
/// their prices. `product_ids` is write-only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub products: Vec<ProductResponse>,
    /// Serialized as a string with two fractional digits
    #[schema(value_type = String)]
    pub total: Decimal,
}

impl OrderResponse {
    /// Assemble the response from the order record and its resolved products.
    pub fn new(order: &Order, products: Vec<Product>) -> Self {
        let mut total: Decimal = products.iter().map(|p| p.price).sum();
        total.rescale(2);

        let mut products: Vec<ProductResponse> =
            products.into_iter().map(ProductResponse::from).collect();
        products.sort_by(|a, b| a.title.cmp(&b.title));

        Self {
            id: order.id,
            products,
            total,
        }
    }
}

/// DTO for creating a new order
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    /// Products to include; each id must resolve to an existing product
    pub product_ids: Vec<Uuid>,
}

/// DTO for updating an existing order (partial semantics).
///
/// `product_ids` present replaces the product set wholesale; absent leaves it
/// untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrder {
    pub product_ids: Option<Vec<Uuid>>,
}

impl Order {
    /// Create a new order over a deduplicated product id set
    pub fn new(mut product_ids: Vec<Uuid>) -> Self {
        product_ids.sort();
        product_ids.dedup();

        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            product_ids,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates; a present product set replaces the existing one
    pub fn apply_update(&mut self, update: UpdateOrder) {
        if let Some(mut product_ids) = update.product_ids {
            product_ids.sort();
            product_ids.dedup();
            self.product_ids = product_ids;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_catalog::{CreateProduct, Product};
    use std::str::FromStr;

    fn product(title: &str, price: &str) -> Product {
        Product::new(
            CreateProduct {
                title: title.to_string(),
                description: String::new(),
                price: Decimal::from_str(price).unwrap(),
                active: true,
                category_ids: None,
            },
            vec![],
        )
    }

    #[test]
    fn test_new_order_deduplicates_product_ids() {
        let id = Uuid::now_v7();
        let order = Order::new(vec![id, id]);
        assert_eq!(order.product_ids, vec![id]);
    }

    #[test]
    fn test_response_total_sums_product_prices() {
        let kindle = product("Kindle", "399.00");
        let mouse = product("Mouse Gamer", "100");
        let order = Order::new(vec![kindle.id, mouse.id]);

        let response = OrderResponse::new(&order, vec![kindle, mouse]);
        assert_eq!(response.total.to_string(), "499.00");
    }

    #[test]
    fn test_response_products_sorted_and_ids_hidden() {
        let kindle = product("Kindle", "399.00");
        let arduino = product("Arduino", "59.90");
        let order = Order::new(vec![kindle.id, arduino.id]);

        let response = OrderResponse::new(&order, vec![kindle, arduino]);
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("product_ids").is_none());
        let titles: Vec<&str> = json["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Arduino", "Kindle"]);
    }

    #[test]
    fn test_apply_update_without_products_keeps_set() {
        let id = Uuid::now_v7();
        let mut order = Order::new(vec![id]);

        order.apply_update(UpdateOrder { product_ids: None });
        assert_eq!(order.product_ids, vec![id]);

        order.apply_update(UpdateOrder {
            product_ids: Some(vec![]),
        });
        assert!(order.product_ids.is_empty());
    }
}
