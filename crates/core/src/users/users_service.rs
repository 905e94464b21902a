use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::users_model::{
    non_blank, normalize_email, validate_email, NewUser, NotificationPreferencesUpdate,
    ProfileUpdate, User, UserCredentials,
};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        let email = normalize_email(&new_user.email);
        validate_email(&email)?;
        let username = non_blank(new_user.username);

        if self.repository.email_exists(&email, None)? {
            return Err(Error::ConstraintViolation(
                "Email already in use".to_string(),
            ));
        }
        if let Some(ref name) = username {
            if self.repository.username_exists(name)? {
                return Err(Error::ConstraintViolation(
                    "Username already taken".to_string(),
                ));
            }
        }

        debug!("Registering user {}", email);
        self.repository
            .create(NewUser {
                username,
                email,
                password_hash: new_user.password_hash,
            })
            .await
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn get_credentials(&self, user_id: &str) -> Result<UserCredentials> {
        self.repository.get_credentials(user_id)
    }

    fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        self.repository
            .find_credentials_by_email(&normalize_email(email))
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User> {
        let email = non_blank(update.email).map(|e| normalize_email(&e));
        if let Some(ref email) = email {
            validate_email(email)?;
            if self.repository.email_exists(email, Some(user_id))? {
                return Err(Error::ConstraintViolation(
                    "Email already in use".to_string(),
                ));
            }
        }

        let changes = ProfileUpdate {
            name: non_blank(update.name),
            email,
            phone: non_blank(update.phone),
            currency: non_blank(update.currency).map(|c| c.to_uppercase()),
            language: non_blank(update.language),
        };
        debug!("Updating profile of user {}", user_id);
        self.repository.update_profile(user_id, changes).await
    }

    async fn update_notifications(
        &self,
        user_id: &str,
        update: NotificationPreferencesUpdate,
    ) -> Result<User> {
        self.repository.update_notifications(user_id, update).await
    }

    async fn set_password_hash(&self, user_id: &str, password_hash: String) -> Result<()> {
        self.repository
            .update_password_hash(user_id, password_hash)
            .await
    }
}
