//! Users module - accounts, profile and preferences.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{
    normalize_email, validate_email, validate_password, NewUser, NotificationPreferences,
    NotificationPreferencesUpdate, ProfileUpdate, User, UserCredentials, UserPreferences,
};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
