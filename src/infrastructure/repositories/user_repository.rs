//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, UpdateUserInput, User, UserRepository};
use crate::models::user::{ActiveModel, Column, Entity as UserEntity};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let user = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(user.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let user = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(user.map(User::from))
    }

    async fn create(&self, name: String, email: String) -> Result<User, DomainError> {
        let user = ActiveModel {
            name: Set(name),
            email: Set(email),
            ..Default::default()
        };

        let result = user.insert(&self.db).await?;
        Ok(User::from(result))
    }

    async fn update(&self, id: i64, input: UpdateUserInput) -> Result<User, DomainError> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::UserNotFound(id))?;

        if input.name.is_none() && input.email.is_none() {
            return Ok(User::from(existing));
        }

        let mut active: ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }

        let result = active.update(&self.db).await?;
        Ok(User::from(result))
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        tracing::debug!("Deleted {} user row(s) for id {}", result.rows_affected, id);
        Ok(())
    }
}
