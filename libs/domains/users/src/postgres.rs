use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::User,
    repository::UserRepository,
};

fn db_error(e: impl std::fmt::Display) -> UserError {
    UserError::Internal(format!("Database error: {}", e))
}

#[derive(Clone)]
pub struct PgUserRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: User) -> UserResult<User> {
        let active_model: entity::ActiveModel = user.into();

        let model = self.base.insert(active_model).await.map_err(db_error)?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = self.base.find_by_id(id).await.map_err(db_error)?;
        Ok(model.map(|m| m.into()))
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Username.eq(username))
            .one(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(model.map(|m| m.into()))
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Username.eq(username))
            .count(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(count > 0)
    }
}
