//! Application state management.
//!
//! Shared state passed to route constructors: configuration, the PostgreSQL
//! connection pool, and the token signer. Cloning is cheap (Arc internals).

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Bearer-token signer/verifier
    pub jwt_auth: axum_helpers::JwtAuth,
}
