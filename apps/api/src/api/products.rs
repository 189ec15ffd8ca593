use axum::Router;
use domain_catalog::{handlers, PgCategoryRepository, PgProductRepository, ProductService};

/// Anonymous, read-only product surface.
pub fn router(state: &crate::state::AppState) -> Router {
    let service = ProductService::new(
        PgProductRepository::new(state.db.clone()),
        PgCategoryRepository::new(state.db.clone()),
    );
    handlers::products_router(service)
}
