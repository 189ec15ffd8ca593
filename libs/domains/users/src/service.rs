use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User, UserResponse};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user with password hashing
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input.validate().map_err(UserError::Validation)?;

        if self.repository.username_exists(&input.username).await? {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let password_hash = self.hash_password(&input.password)?;
        let user = User::new(input.username, password_hash, input.is_staff);

        let created = self.repository.insert(user).await?;
        Ok(created.into())
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    /// Verify credentials for the token exchange.
    ///
    /// Unknown usernames, wrong passwords and inactive accounts are all
    /// reported as the same invalid-credentials failure.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> UserResult<User> {
        let user = self
            .repository
            .get_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !user.is_active {
            return Err(UserError::InvalidCredentials);
        }

        if !self.verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};

    fn create_input(username: &str, password: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            password: password.to_string(),
            is_staff: false,
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let repo = InMemoryUserRepository::new();
        let service = UserService::new(repo.clone());

        service
            .create_user(create_input("admin", "s3cret-password"))
            .await
            .unwrap();

        let stored = repo.get_by_username("admin").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "s3cret-password");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_verify_credentials_roundtrip() {
        let service = UserService::new(InMemoryUserRepository::new());

        service
            .create_user(create_input("admin", "s3cret-password"))
            .await
            .unwrap();

        let user = service
            .verify_credentials("admin", "s3cret-password")
            .await
            .unwrap();
        assert_eq!(user.username, "admin");

        let err = service
            .verify_credentials("admin", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_username_is_invalid_credentials() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_username().returning(|_| Ok(None));

        let service = UserService::new(repo);

        let err = service
            .verify_credentials("ghost", "whatever-password")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_inactive_account_cannot_authenticate() {
        let repo = InMemoryUserRepository::new();
        let service = UserService::new(repo.clone());

        service
            .create_user(create_input("admin", "s3cret-password"))
            .await
            .unwrap();

        // Deactivate directly in the store
        let mut user = repo.get_by_username("admin").await.unwrap().unwrap();
        user.is_active = false;
        repo.insert(user).await.unwrap();

        let err = service
            .verify_credentials("admin", "s3cret-password")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let service = UserService::new(InMemoryUserRepository::new());

        service
            .create_user(create_input("admin", "s3cret-password"))
            .await
            .unwrap();

        let err = service
            .create_user(create_input("admin", "other-password"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::DuplicateUsername(_)));
    }
}
