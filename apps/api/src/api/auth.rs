use axum::Router;
use domain_users::{token_router, AuthState, PgUserRepository, UserService};

/// Credential exchange: POST username/password, receive a bearer token.
pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository);

    token_router(AuthState {
        service,
        jwt_auth: state.jwt_auth.clone(),
    })
}
