use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
}

/// JWT authentication middleware
///
/// Validates the bearer token from the Authorization header and inserts
/// [`super::JwtClaims`] into request extensions on success. Requests without
/// a valid token are rejected before the handler runs.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, Router};
/// use axum_helpers::{jwt_auth_middleware, JwtAuth};
///
/// let protected = Router::new()
///     .nest("/orders", orders_router)
///     .layer(middleware::from_fn_with_state(jwt_auth.clone(), jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_bearer_token(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No bearer token in Authorization header");
            return Err(AppError::Unauthorized(
                "Authentication credentials were not provided.".to_string(),
            )
            .into_response());
        }
    };

    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("Token verification failed: {}", e);
            return Err(AppError::Unauthorized("Invalid token.".to_string()).into_response());
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
