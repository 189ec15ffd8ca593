use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Usernames: letters, digits and @ . + - _
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !USERNAME_PATTERN.is_match(username) {
        let mut err = ValidationError::new("invalid_username");
        err.message =
            Some("username may only contain letters, numbers and @/./+/-/_ characters.".into());
        return Err(err);
    }
    Ok(())
}

/// User entity - an API account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Login name (unique)
    pub username: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the account may use the admin surface
    pub is_staff: bool,
    /// Inactive accounts cannot obtain tokens
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_staff: user.is_staff,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 150), custom(function = "validate_username"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters."))]
    pub password: String,
    #[serde(default)]
    pub is_staff: bool,
}

/// DTO for the credential exchange
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response carrying the bearer token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

impl User {
    /// Create a new user (password already hashed by the service layer)
    pub fn new(username: String, password_hash: String, is_staff: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username,
            password_hash,
            is_staff,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
