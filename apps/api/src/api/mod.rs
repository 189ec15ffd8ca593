use axum::Router;

pub mod auth;
pub mod categories;
pub mod health;
pub mod orders;
pub mod products;

/// Creates the API routes.
///
/// Resource routes live under both supported version prefixes,
/// `/bookstore/v1` and `/bookstore/v2`, with identical behavior; the token
/// endpoint sits at the root. Sub-routers have state already applied, so the
/// returned router is stateless.
pub fn routes(state: &crate::state::AppState) -> Router {
    let resources = Router::new()
        .nest("/products", products::router(state))
        .nest("/categories", categories::router(state))
        .nest("/orders", orders::router(state));

    Router::new()
        .nest("/bookstore/v1", resources.clone())
        .nest("/bookstore/v2", resources)
        .nest("/api-token-auth", auth::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health
/// checks against the database.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
