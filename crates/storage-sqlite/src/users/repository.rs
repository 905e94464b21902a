use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use pennywise_core::users::{
    NewUser, NotificationPreferences, NotificationPreferencesUpdate, ProfileUpdate, User,
    UserCredentials, UserPreferences, UserRepositoryTrait,
};
use pennywise_core::{Error, Result};

use super::model::{NotificationChangeset, UserDB, UserProfileChangeset};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }

    fn load(&self, user_id: &str) -> Result<UserDB> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::NotFound("User".to_string()))
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        self.load(user_id).map(User::from)
    }

    fn get_credentials(&self, user_id: &str) -> Result<UserCredentials> {
        self.load(user_id).map(UserCredentials::from)
    }

    fn find_credentials_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(UserCredentials::from))
    }

    fn email_exists(&self, email: &str, excluding_user_id: Option<&str>) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = users::table
            .filter(users::email.eq(email))
            .select(users::id)
            .into_boxed();
        if let Some(user_id) = excluding_user_id {
            query = query.filter(users::id.ne(user_id));
        }
        let found: Option<String> = query.first(&mut conn).optional().into_core()?;
        Ok(found.is_some())
    }

    fn username_exists(&self, username: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let found: Option<String> = users::table
            .filter(users::username.eq(username))
            .select(users::id)
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(found.is_some())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = Utc::now().naive_utc();
                let preferences = UserPreferences::default();
                let notifications = NotificationPreferences::default();
                let row = UserDB {
                    id: Uuid::new_v4().to_string(),
                    username: new_user.username,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    name: None,
                    phone: None,
                    currency: preferences.currency,
                    language: preferences.language,
                    email_notifications: notifications.email_notifications,
                    budget_alerts: notifications.budget_alerts,
                    goal_reminders: notifications.goal_reminders,
                    weekly_reports: notifications.weekly_reports,
                    created_at: now,
                    updated_at: now,
                };
                let inserted = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(User::from(inserted))
            })
            .await
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let changes = UserProfileChangeset::new(update, Utc::now().naive_utc());
                let updated = diesel::update(users::table.find(&user_id))
                    .set(&changes)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::NotFound("User".to_string()))?;
                Ok(User::from(updated))
            })
            .await
    }

    async fn update_notifications(
        &self,
        user_id: &str,
        update: NotificationPreferencesUpdate,
    ) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let changes = NotificationChangeset::new(update, Utc::now().naive_utc());
                let updated = diesel::update(users::table.find(&user_id))
                    .set(&changes)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::NotFound("User".to_string()))?;
                Ok(User::from(updated))
            })
            .await
    }

    async fn update_password_hash(&self, user_id: &str, password_hash: String) -> Result<()> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let affected = diesel::update(users::table.find(&user_id))
                    .set((
                        users::password_hash.eq(password_hash),
                        users::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::NotFound("User".to_string()));
                }
                Ok(())
            })
            .await
    }
}
