//! Users service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::domain::users::{
    data::NewUser,
    errors::UsersServiceError,
    records::{UserRecord, UserUuid},
    repository::UsersRepository,
};

#[derive(Clone)]
pub struct StoreUsersService {
    repository: Arc<dyn UsersRepository>,
}

impl StoreUsersService {
    #[must_use]
    pub fn new(repository: Arc<dyn UsersRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UsersService for StoreUsersService {
    #[tracing::instrument(
        name = "users.service.create_user",
        skip(self, user),
        fields(user_uuid = %user.uuid, role = %user.role),
        err
    )]
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let email = user.email.trim();

        if user.name.trim().is_empty() || email.is_empty() || !email.contains('@') {
            return Err(UsersServiceError::InvalidData);
        }

        let user = NewUser {
            email: email.to_lowercase(),
            ..user
        };

        let created = self.repository.create_user(user).await?;

        info!(user_uuid = %created.uuid, "created user");

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        self.repository
            .find_user(user)
            .await?
            .ok_or(UsersServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a user. Emails are unique, compared case-insensitively.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;
}
