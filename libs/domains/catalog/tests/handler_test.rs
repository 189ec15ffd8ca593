//! Handler tests for the catalog domain.
//!
//! These drive the axum routers directly over the in-memory repositories:
//! request deserialization, response shape, status codes, and error bodies.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn repositories() -> (InMemoryProductRepository, InMemoryCategoryRepository) {
    let categories = InMemoryCategoryRepository::new();
    let products = InMemoryProductRepository::new(categories.clone());
    (products, categories)
}

async fn seed_category(
    service: &CategoryService<InMemoryCategoryRepository>,
    title: &str,
) -> Category {
    service
        .create_category(CreateCategory {
            title: title.to_string(),
            slug: title.to_lowercase(),
            description: String::new(),
            active: true,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_get_product_renders_nested_categories_sorted() {
    let (products, categories) = repositories();
    let category_service = CategoryService::new(categories.clone());
    let product_service = ProductService::new(products, categories);

    let tech = seed_category(&category_service, "Tech").await;
    let fiction = seed_category(&category_service, "Fiction").await;

    let created = product_service
        .create_product(CreateProduct {
            title: "Clean Architecture".to_string(),
            description: "Uncle Bob vibes".to_string(),
            price: Decimal::from_str("99.90").unwrap(),
            active: true,
            category_ids: Some(vec![tech.id, fiction.id]),
        })
        .await
        .unwrap();

    let app = handlers::products_router(product_service);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["title"], "Clean Architecture");
    assert_eq!(body["price"], "99.90");
    assert!(body.get("category_ids").is_none());

    let titles: Vec<&str> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Fiction", "Tech"]);
}

#[tokio::test]
async fn test_list_products_paginates_with_envelope() {
    let (products, categories) = repositories();
    let product_service = ProductService::new(products, categories);

    for i in 0..7 {
        product_service
            .create_product(CreateProduct {
                title: format!("Book {}", i),
                description: String::new(),
                price: Decimal::from_str("10.00").unwrap(),
                active: true,
                category_ids: None,
            })
            .await
            .unwrap();
    }

    let app = handlers::products_router(product_service);

    let response = app
        .clone()
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
    assert_eq!(body["count"], 7);
    assert_eq!(body["results"].as_array().unwrap().len(), 5);
    assert_eq!(body["previous"], Value::Null);
    assert!(body["next"].as_str().unwrap().contains("page=2"));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/?page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["next"], Value::Null);
    assert!(body["previous"].as_str().unwrap().contains("page=1"));
}

#[tokio::test]
async fn test_list_products_page_out_of_range_is_404() {
    let (products, categories) = repositories();
    let app = handlers::products_router(ProductService::new(products, categories));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/?page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_product_unknown_id_is_404() {
    let (products, categories) = repositories();
    let app = handlers::products_router(ProductService::new(products, categories));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/{}", uuid::Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_product_malformed_uuid_is_400() {
    let (products, categories) = repositories();
    let app = handlers::products_router(ProductService::new(products, categories));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_surface_is_read_only() {
    let (products, categories) = repositories();
    let app = handlers::products_router(ProductService::new(products, categories));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"title": "Kindle", "price": "399.00"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_create_category_returns_201() {
    let (_, categories) = repositories();
    let app = handlers::categories_admin_router(CategoryService::new(categories));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"title": "Romance", "slug": "romance"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert!(body.get("id").is_some());
    assert_eq!(body["title"], "Romance");
    assert_eq!(body["active"], true);
}

#[tokio::test]
async fn test_create_category_with_bad_slug_is_400_on_slug() {
    let (_, categories) = repositories();
    let app = handlers::categories_admin_router(CategoryService::new(categories));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"title": "Romance", "slug": "not a slug!"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert!(body["details"].get("slug").is_some());
}

#[tokio::test]
async fn test_update_category_partial_semantics() {
    let (_, categories) = repositories();
    let service = CategoryService::new(categories);

    let created = service
        .create_category(CreateCategory {
            title: "Tech".to_string(),
            slug: "tech".to_string(),
            description: "gadgets".to_string(),
            active: true,
        })
        .await
        .unwrap();

    let app = handlers::categories_admin_router(service);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/{}", created.id))
                .header("content-type", "application/json")
                .body(Body::from(json!({"active": false}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["active"], false);
    assert_eq!(body["title"], "Tech");
    assert_eq!(body["description"], "gadgets");
}

#[tokio::test]
async fn test_delete_category_returns_204() {
    let (_, categories) = repositories();
    let service = CategoryService::new(categories);

    let created = service
        .create_category(CreateCategory {
            title: "Tech".to_string(),
            slug: "tech".to_string(),
            description: String::new(),
            active: true,
        })
        .await
        .unwrap();

    let app = handlers::categories_admin_router(service);

    let response = app
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
}
