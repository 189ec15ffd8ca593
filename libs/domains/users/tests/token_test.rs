//! Handler tests for the credential-exchange endpoint.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn jwt_auth() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new("token-test-secret-of-sufficient-len!"))
}

async fn app_with_user(username: &str, password: &str) -> axum::Router {
    let repository = InMemoryUserRepository::new();
    let service = UserService::new(repository.clone());

    service
        .create_user(CreateUser {
            username: username.to_string(),
            password: password.to_string(),
            is_staff: false,
        })
        .await
        .unwrap();

    token_router(AuthState {
        service,
        jwt_auth: jwt_auth(),
    })
}

#[tokio::test]
async fn test_valid_credentials_yield_verifiable_token() {
    let app = app_with_user("admin", "s3cret-password").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
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
    let token = body["token"].as_str().unwrap();

    let claims = jwt_auth().verify_token(token).unwrap();
    assert_eq!(claims.username, "admin");
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = app_with_user("admin", "s3cret-password").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({"username": "admin", "password": "wrong"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    assert_eq!(
        body["message"],
        "Unable to log in with provided credentials."
    );
}

#[tokio::test]
async fn test_missing_fields_fail_validation() {
    let app = app_with_user("admin", "s3cret-password").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(json!({"username": "admin"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    // Body is missing "password" entirely, rejected at deserialization
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
