//! Users domain: account storage and the credential-exchange endpoint.
//!
//! Accounts are created out-of-band (an operator or an admin surface); the
//! HTTP surface here only exchanges username/password for a bearer token.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::{token_router, AuthState};
pub use models::{CreateUser, TokenRequest, TokenResponse, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
