//! Routing/authentication tests over the same router shape the app wires,
//! using the domains' in-memory repositories so no database is needed.
//!
//! Verifies the access rules of the two API surfaces: products are open to
//! anonymous callers, orders require a bearer token.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{middleware, Router};
use axum_helpers::{jwt_auth_middleware, JwtAuth, JwtConfig};
use domain_catalog::{
    CreateProduct, InMemoryCategoryRepository, InMemoryProductRepository, ProductService,
};
use domain_orders::{InMemoryOrderRepository, OrderService};
use domain_users::{AuthState, CreateUser, InMemoryUserRepository, UserService};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The app's route tree over in-memory repositories.
async fn test_app() -> Router {
    let jwt_auth = JwtAuth::new(&JwtConfig::new("routing-test-secret-of-sufficient-len"));

    let categories = InMemoryCategoryRepository::new();
    let products = InMemoryProductRepository::new(categories.clone());
    let orders = InMemoryOrderRepository::new();
    let users = InMemoryUserRepository::new();

    // Seed one product and one account
    ProductService::new(products.clone(), categories.clone())
        .create_product(CreateProduct {
            title: "Clean Architecture".to_string(),
            description: String::new(),
            price: Decimal::from_str("99.90").unwrap(),
            active: true,
            category_ids: None,
        })
        .await
        .unwrap();

    let user_service = UserService::new(users.clone());
    user_service
        .create_user(CreateUser {
            username: "admin".to_string(),
            password: "s3cret-password".to_string(),
            is_staff: true,
        })
        .await
        .unwrap();

    let resources = Router::new()
        .nest(
            "/products",
            domain_catalog::handlers::products_router(ProductService::new(
                products.clone(),
                categories.clone(),
            )),
        )
        .nest(
            "/categories",
            domain_catalog::handlers::categories_router(domain_catalog::CategoryService::new(
                categories.clone(),
            ))
            .merge(
                domain_catalog::handlers::categories_admin_router(
                    domain_catalog::CategoryService::new(categories.clone()),
                )
                .layer(middleware::from_fn_with_state(
                    jwt_auth.clone(),
                    jwt_auth_middleware,
                )),
            ),
        )
        .nest(
            "/orders",
            domain_orders::handlers::router(OrderService::new(orders, products)).layer(
                middleware::from_fn_with_state(jwt_auth.clone(), jwt_auth_middleware),
            ),
        );

    Router::new()
        .nest("/bookstore/v1", resources.clone())
        .nest("/bookstore/v2", resources)
        .nest(
            "/api-token-auth",
            domain_users::token_router(AuthState {
                service: user_service,
                jwt_auth,
            }),
        )
}

async fn obtain_token(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api-token-auth/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"username": "admin", "password": "s3cret-password"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_anonymous_product_list_succeeds() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/bookstore/v1/products/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_both_version_prefixes_serve_the_same_resources() {
    let app = test_app().await;

    for version in ["v1", "v2"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/bookstore/{}/products/", version))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "version {}", version);
    }
}

#[tokio::test]
async fn test_anonymous_order_access_is_denied() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/bookstore/v1/orders/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bookstore/v1/orders/")
                .header("content-type", "application/json")
                .body(Body::from(json!({"product_ids": []}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_denied() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/bookstore/v1/orders/")
                .header("authorization", "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Invalid token.");
}

#[tokio::test]
async fn test_token_flow_grants_order_access() {
    let app = test_app().await;
    let token = obtain_token(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/bookstore/v1/orders/")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_anonymous_category_write_is_denied_but_read_is_open() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/bookstore/v1/categories/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bookstore/v1/categories/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"title": "Romance", "slug": "romance"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bad_credentials_do_not_yield_a_token() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api-token-auth/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"username": "admin", "password": "wrong"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
