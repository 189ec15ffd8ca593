use axum::{middleware, Router};
use axum_helpers::jwt_auth_middleware;
use domain_catalog::{handlers, CategoryService, PgCategoryRepository};

/// Category surface: anonymous reads, authenticated writes.
pub fn router(state: &crate::state::AppState) -> Router {
    let read = handlers::categories_router(CategoryService::new(PgCategoryRepository::new(
        state.db.clone(),
    )));

    let write = handlers::categories_admin_router(CategoryService::new(PgCategoryRepository::new(
        state.db.clone(),
    )))
    .layer(middleware::from_fn_with_state(
        state.jwt_auth.clone(),
        jwt_auth_middleware,
    ));

    read.merge(write)
}
