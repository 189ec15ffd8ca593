//! PostgreSQL integration tests for the order repository.
//!
//! Ignored by default; run with `cargo test -- --ignored` where Docker is
//! available.

use domain_catalog::{CreateProduct, PgCategoryRepository, PgProductRepository, ProductService};
use domain_orders::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use test_utils::TestDatabase;

#[tokio::test]
#[ignore] // Requires Docker
async fn test_order_roundtrip_with_products() {
    let db = TestDatabase::new().await;

    let product_service = ProductService::new(
        PgProductRepository::new(db.connection()),
        PgCategoryRepository::new(db.connection()),
    );
    let order_service = OrderService::new(
        PgOrderRepository::new(db.connection()),
        PgProductRepository::new(db.connection()),
    );

    let kindle = product_service
        .create_product(CreateProduct {
            title: "Kindle".to_string(),
            description: String::new(),
            price: Decimal::from_str("399.00").unwrap(),
            active: true,
            category_ids: None,
        })
        .await
        .unwrap();

    let created = order_service
        .create_order(CreateOrder {
            product_ids: vec![kindle.id],
        })
        .await
        .unwrap();

    let fetched = order_service.get_order(created.id).await.unwrap();
    assert_eq!(fetched.products.len(), 1);
    assert_eq!(fetched.total.to_string(), "399.00");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_order_replaces_join_rows() {
    let db = TestDatabase::new().await;

    let product_service = ProductService::new(
        PgProductRepository::new(db.connection()),
        PgCategoryRepository::new(db.connection()),
    );
    let order_service = OrderService::new(
        PgOrderRepository::new(db.connection()),
        PgProductRepository::new(db.connection()),
    );

    let kindle = product_service
        .create_product(CreateProduct {
            title: "Kindle".to_string(),
            description: String::new(),
            price: Decimal::from_str("399.00").unwrap(),
            active: true,
            category_ids: None,
        })
        .await
        .unwrap();
    let mouse = product_service
        .create_product(CreateProduct {
            title: "Mouse Gamer".to_string(),
            description: String::new(),
            price: Decimal::from(100),
            active: true,
            category_ids: None,
        })
        .await
        .unwrap();

    let created = order_service
        .create_order(CreateOrder {
            product_ids: vec![kindle.id],
        })
        .await
        .unwrap();

    order_service
        .update_order(
            created.id,
            UpdateOrder {
                product_ids: Some(vec![mouse.id]),
            },
        )
        .await
        .unwrap();

    let fetched = order_service.get_order(created.id).await.unwrap();
    assert_eq!(fetched.products.len(), 1);
    assert_eq!(fetched.products[0].title, "Mouse Gamer");
    assert_eq!(fetched.total.to_string(), "100.00");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_deleting_product_drops_from_order() {
    let db = TestDatabase::new().await;

    let product_service = ProductService::new(
        PgProductRepository::new(db.connection()),
        PgCategoryRepository::new(db.connection()),
    );
    let order_service = OrderService::new(
        PgOrderRepository::new(db.connection()),
        PgProductRepository::new(db.connection()),
    );

    let kindle = product_service
        .create_product(CreateProduct {
            title: "Kindle".to_string(),
            description: String::new(),
            price: Decimal::from_str("399.00").unwrap(),
            active: true,
            category_ids: None,
        })
        .await
        .unwrap();

    let created = order_service
        .create_order(CreateOrder {
            product_ids: vec![kindle.id],
        })
        .await
        .unwrap();

    product_service.delete_product(kindle.id).await.unwrap();

    let fetched = order_service.get_order(created.id).await.unwrap();
    assert!(fetched.products.is_empty());
    assert_eq!(fetched.total.to_string(), "0.00");
}
