//! JWT bearer-token authentication.
//!
//! The token endpoint exchanges credentials for a signed bearer token; the
//! middleware verifies the `Authorization: Bearer <token>` header and makes
//! the claims available to handlers through request extensions.

mod config;
mod jwt;
mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, TOKEN_TTL};
pub use middleware::jwt_auth_middleware;
