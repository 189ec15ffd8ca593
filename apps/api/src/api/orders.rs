use axum::{middleware, Router};
use axum_helpers::jwt_auth_middleware;
use domain_catalog::PgProductRepository;
use domain_orders::{handlers, OrderService, PgOrderRepository};

/// Order surface: every operation requires an authenticated caller.
pub fn router(state: &crate::state::AppState) -> Router {
    let service = OrderService::new(
        PgOrderRepository::new(state.db.clone()),
        PgProductRepository::new(state.db.clone()),
    );

    handlers::router(service).layer(middleware::from_fn_with_state(
        state.jwt_auth.clone(),
        jwt_auth_middleware,
    ))
}
