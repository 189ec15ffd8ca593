//! Handler tests for the orders domain, driven over in-memory repositories.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::{
    CreateProduct, InMemoryCategoryRepository, InMemoryProductRepository, Product, ProductService,
};
use domain_orders::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

struct Fixture {
    products: InMemoryProductRepository,
    orders: InMemoryOrderRepository,
}

impl Fixture {
    fn new() -> Self {
        let categories = InMemoryCategoryRepository::new();
        Self {
            products: InMemoryProductRepository::new(categories),
            orders: InMemoryOrderRepository::new(),
        }
    }

    async fn seed_product(&self, title: &str, price: &str) -> Product {
        let categories = InMemoryCategoryRepository::new();
        let service = ProductService::new(self.products.clone(), categories);
        service
            .create_product(CreateProduct {
                title: title.to_string(),
                description: String::new(),
                price: Decimal::from_str(price).unwrap(),
                active: true,
                category_ids: None,
            })
            .await
            .unwrap()
    }

    fn app(&self) -> axum::Router {
        handlers::router(OrderService::new(self.orders.clone(), self.products.clone()))
    }
}

#[tokio::test]
async fn test_create_order_returns_201_with_total() {
    let fixture = Fixture::new();
    let kindle = fixture.seed_product("Kindle", "399.00").await;
    let mouse = fixture.seed_product("Mouse Gamer", "100").await;

    let response = fixture
        .app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"product_ids": [kindle.id, mouse.id]}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["total"], "499.00");
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert!(body.get("product_ids").is_none());
}

#[tokio::test]
async fn test_create_order_with_unknown_product_is_400() {
    let fixture = Fixture::new();

    let response = fixture
        .app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"product_ids": [uuid::Uuid::now_v7()]}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body["details"].get("product_ids").is_some());
}

#[tokio::test]
async fn test_patch_order_replaces_product_set() {
    let fixture = Fixture::new();
    let kindle = fixture.seed_product("Kindle", "399.00").await;
    let mouse = fixture.seed_product("Mouse Gamer", "100").await;

    let service = OrderService::new(fixture.orders.clone(), fixture.products.clone());
    let created = service
        .create_order(CreateOrder {
            product_ids: vec![kindle.id],
        })
        .await
        .unwrap();

    let response = fixture
        .app()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/{}", created.id))
                .header("content-type", "application/json")
                .body(Body::from(json!({"product_ids": [mouse.id]}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["total"], "100.00");
    assert_eq!(body["products"][0]["title"], "Mouse Gamer");
}

#[tokio::test]
async fn test_put_order_without_product_ids_keeps_set() {
    let fixture = Fixture::new();
    let kindle = fixture.seed_product("Kindle", "399.00").await;

    let service = OrderService::new(fixture.orders.clone(), fixture.products.clone());
    let created = service
        .create_order(CreateOrder {
            product_ids: vec![kindle.id],
        })
        .await
        .unwrap();

    let response = fixture
        .app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/{}", created.id))
                .header("content-type", "application/json")
                .body(Body::from(json!({}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["products"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_orders_paginates_with_envelope() {
    let fixture = Fixture::new();
    let kindle = fixture.seed_product("Kindle", "399.00").await;

    let service = OrderService::new(fixture.orders.clone(), fixture.products.clone());
    for _ in 0..6 {
        service
            .create_order(CreateOrder {
                product_ids: vec![kindle.id],
            })
            .await
            .unwrap();
    }

    let response = fixture
        .app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["count"], 6);
    assert_eq!(body["results"].as_array().unwrap().len(), 5);
    assert!(body["next"].as_str().unwrap().contains("page=2"));
}

#[tokio::test]
async fn test_delete_order_returns_204_then_404() {
    let fixture = Fixture::new();

    let service = OrderService::new(fixture.orders.clone(), fixture.products.clone());
    let created = service
        .create_order(CreateOrder { product_ids: vec![] })
        .await
        .unwrap();

    let response = fixture
        .app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = fixture
        .app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
