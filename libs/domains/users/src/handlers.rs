use axum::{routing::post, Json, Router};
use axum_helpers::{
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse},
    JwtAuth, ValidatedJson,
};
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{TokenRequest, TokenResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the credential-exchange endpoint
#[derive(OpenApi)]
#[openapi(
    paths(obtain_token),
    components(
        schemas(TokenRequest, TokenResponse),
        responses(BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "auth", description = "Credential exchange for bearer tokens")
    )
)]
pub struct ApiDoc;

/// Application state for the token endpoint
#[derive(Clone)]
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt_auth: JwtAuth,
}

/// Create the token-exchange router
pub fn token_router<R>(state: AuthState<R>) -> Router
where
    R: UserRepository + Clone + 'static,
{
    Router::new()
        .route("/", post(obtain_token::<R>))
        .with_state(state)
}

/// Exchange username/password for a bearer token
#[utoipa::path(
    post,
    path = "",
    tag = "auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn obtain_token<R: UserRepository>(
    axum::extract::State(state): axum::extract::State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<TokenRequest>,
) -> UserResult<Json<TokenResponse>> {
    let user = state
        .service
        .verify_credentials(&input.username, &input.password)
        .await?;

    let token = state
        .jwt_auth
        .create_token(&user.id.to_string(), &user.username)
        .map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    tracing::info!(user_id = %user.id, "Issued bearer token");
    Ok(Json(TokenResponse { token }))
}
