use crate::errors::Result;
use crate::users::users_model::{
    NewUser, NotificationPreferencesUpdate, ProfileUpdate, User, UserCredentials,
};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn get_credentials(&self, user_id: &str) -> Result<UserCredentials>;
    fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;
    /// Whether `email` belongs to any user other than `excluding_user_id`.
    fn email_exists(&self, email: &str, excluding_user_id: Option<&str>) -> Result<bool>;
    fn username_exists(&self, username: &str) -> Result<bool>;
    async fn create(&self, new_user: NewUser) -> Result<User>;
    /// Writes the provided profile columns only; `None` keeps the stored value.
    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User>;
    /// Writes the provided notification flags only.
    async fn update_notifications(
        &self,
        user_id: &str,
        update: NotificationPreferencesUpdate,
    ) -> Result<User>;
    async fn update_password_hash(&self, user_id: &str, password_hash: String) -> Result<()>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn get_credentials(&self, user_id: &str) -> Result<UserCredentials>;
    fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;
    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User>;
    async fn update_notifications(
        &self,
        user_id: &str,
        update: NotificationPreferencesUpdate,
    ) -> Result<User>;
    async fn set_password_hash(&self, user_id: &str, password_hash: String) -> Result<()>;
}
