//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use pennywise_core::users::{
    NotificationPreferences, NotificationPreferencesUpdate, ProfileUpdate, User, UserCredentials,
    UserPreferences,
};

/// Database model for users
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub currency: String,
    pub language: String,
    pub email_notifications: bool,
    pub budget_alerts: bool,
    pub goal_reminders: bool,
    pub weekly_reports: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Profile columns written by `UserRepository::update_profile`. `None`
/// leaves the column as stored.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserProfileChangeset {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub currency: Option<String>,
    pub language: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Notification flags written by `UserRepository::update_notifications`.
/// Flags that are `None` keep their stored value.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NotificationChangeset {
    pub email_notifications: Option<bool>,
    pub budget_alerts: Option<bool>,
    pub goal_reminders: Option<bool>,
    pub weekly_reports: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        User {
            id: db.id,
            username: db.username,
            email: db.email,
            name: db.name,
            phone: db.phone,
            preferences: UserPreferences {
                currency: db.currency,
                language: db.language,
            },
            notification_preferences: NotificationPreferences {
                email_notifications: db.email_notifications,
                budget_alerts: db.budget_alerts,
                goal_reminders: db.goal_reminders,
                weekly_reports: db.weekly_reports,
            },
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<UserDB> for UserCredentials {
    fn from(db: UserDB) -> Self {
        let password_hash = db.password_hash.clone();
        UserCredentials {
            user: User::from(db),
            password_hash,
        }
    }
}

impl UserProfileChangeset {
    pub fn new(update: ProfileUpdate, updated_at: NaiveDateTime) -> Self {
        UserProfileChangeset {
            email: update.email,
            name: update.name,
            phone: update.phone,
            currency: update.currency,
            language: update.language,
            updated_at,
        }
    }
}

impl NotificationChangeset {
    pub fn new(update: NotificationPreferencesUpdate, updated_at: NaiveDateTime) -> Self {
        NotificationChangeset {
            email_notifications: update.email_notifications,
            budget_alerts: update.budget_alerts,
            goal_reminders: update.goal_reminders,
            weekly_reports: update.weekly_reports,
            updated_at,
        }
    }
}
