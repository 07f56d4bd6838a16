//! User Service - account CRUD with unique emails

use std::sync::Arc;

use crate::domain::validation::{validate_new_user, validate_user_update};
use crate::domain::{CreateUserInput, DomainError, UpdateUserInput, User, UserRepository};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn create(&self, input: CreateUserInput) -> Result<User, DomainError> {
        validate_new_user(&input)?;
        let (Some(name), Some(email)) = (input.name, input.email) else {
            return Err(DomainError::Validation(
                "name and email must be present".to_string(),
            ));
        };

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailConflict(email));
        }

        let user = self.users.create(name, email).await?;
        tracing::info!("Created user {} <{}>", user.id, user.email);
        Ok(user)
    }

    pub async fn update(&self, id: i64, input: UpdateUserInput) -> Result<User, DomainError> {
        validate_user_update(&input)?;
        let existing = self.get(id).await?;

        if let Some(email) = &input.email {
            if *email != existing.email {
                if let Some(other) = self.users.find_by_email(email).await? {
                    if other.id != id {
                        return Err(DomainError::EmailConflict(email.clone()));
                    }
                }
            }
        }

        self.users.update(id, input).await
    }

    pub async fn get(&self, id: i64) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.users.find_all().await
    }

    /// Deleting an unknown user is not an error
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.users.delete(id).await
    }
}
