//! Users domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CURRENCY, DEFAULT_LANGUAGE, MIN_PASSWORD_LENGTH};
use crate::errors::{Error, Result};

/// Domain model representing a registered user.
///
/// The password hash is deliberately not part of this type so that it can
/// never leak into an API response; see [`UserCredentials`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub preferences: UserPreferences,
    pub notification_preferences: NotificationPreferences,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub currency: String,
    pub language: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        UserPreferences {
            currency: DEFAULT_CURRENCY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email_notifications: bool,
    pub budget_alerts: bool,
    pub goal_reminders: bool,
    pub weekly_reports: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        NotificationPreferences {
            email_notifications: true,
            budget_alerts: true,
            goal_reminders: true,
            weekly_reports: false,
        }
    }
}

/// A user together with the stored password hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Input model for registering a user. The password is hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: String,
    pub password_hash: String,
}

/// Partial profile update. Empty strings are treated as "not provided".
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub currency: Option<String>,
    pub language: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferencesUpdate {
    pub email_notifications: Option<bool>,
    pub budget_alerts: Option<bool>,
    pub goal_reminders: Option<bool>,
    pub weekly_reports: Option<bool>,
}

/// Canonical form of an e-mail address: trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<()> {
    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| Error::invalid_input("A valid email address is required"))?;
    if local.is_empty() || domain.is_empty() {
        return Err(Error::invalid_input("A valid email address is required"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::invalid_input(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Trims an optional text field, mapping blank input to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
