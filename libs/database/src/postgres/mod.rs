//! PostgreSQL support built on SeaORM

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_options,
    connect_with_retry, run_migrations,
};
pub use health::check_health;

// Re-export so downstream crates don't need a direct sea-orm dependency
// just to hold a connection handle.
pub use sea_orm::DatabaseConnection;
