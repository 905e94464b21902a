//! Request and response bodies of the HTTP API.
//!
//! Incoming bodies keep every field optional so that a missing field is
//! reported as a 400 with a readable message instead of a JSON rejection.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use pennywise_core::budgets::{self as core_budgets, BudgetPeriod};
use pennywise_core::errors::{Error as CoreError, Result as CoreResult};
use pennywise_core::goals::{self as core_goals, INVALID_CONTRIBUTION_MESSAGE};
use pennywise_core::transactions::{self as core_transactions, TransactionType};
use pennywise_core::users::{self as core_users, NotificationPreferences, UserPreferences};
use pennywise_core::utils::MonthPeriod;

fn parse_opt<T>(value: Option<&str>) -> CoreResult<Option<T>>
where
    T: FromStr<Err = CoreError>,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(T::from_str)
        .transpose()
}

// ===================== Users / auth =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = Object)]
    pub preferences: UserPreferences,
    #[schema(value_type = Object)]
    pub notification_preferences: NotificationPreferences,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_users::User> for User {
    fn from(u: core_users::User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            name: u.name,
            phone: u.phone,
            preferences: u.preferences,
            notification_preferences: u.notification_preferences,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Profile fields to change; blank or absent fields keep their value.
#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub currency: Option<String>,
    pub language: Option<String>,
}

impl From<ProfileUpdateRequest> for core_users::ProfileUpdate {
    fn from(r: ProfileUpdateRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
            currency: r.currency,
            language: r.language,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsRequest {
    pub email_notifications: Option<bool>,
    pub budget_alerts: Option<bool>,
    pub goal_reminders: Option<bool>,
    pub weekly_reports: Option<bool>,
}

impl From<NotificationsRequest> for core_users::NotificationPreferencesUpdate {
    fn from(r: NotificationsRequest) -> Self {
        Self {
            email_notifications: r.email_notifications,
            budget_alerts: r.budget_alerts,
            goal_reminders: r.goal_reminders,
            weekly_reports: r.weekly_reports,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

// ===================== Transactions =====================

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub transaction_type: TransactionType,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_transactions::Transaction> for Transaction {
    fn from(t: core_transactions::Transaction) -> Self {
        Self {
            id: t.id,
            amount: t.amount,
            category: t.category,
            date: t.date,
            notes: t.notes,
            transaction_type: t.transaction_type,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

impl TryFrom<NewTransaction> for core_transactions::NewTransaction {
    type Error = CoreError;

    fn try_from(t: NewTransaction) -> CoreResult<Self> {
        let transaction_type = parse_opt::<TransactionType>(t.transaction_type.as_deref())?
            .unwrap_or_default();
        let (Some(amount), Some(category), Some(date)) = (t.amount, t.category, t.date) else {
            return Err(CoreError::invalid_input(
                "Amount, category, and date are required",
            ));
        };
        Ok(Self {
            amount,
            category,
            date,
            notes: t.notes,
            transaction_type,
        })
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

impl TryFrom<TransactionUpdate> for core_transactions::TransactionUpdate {
    type Error = CoreError;

    fn try_from(t: TransactionUpdate) -> CoreResult<Self> {
        Ok(Self {
            transaction_type: parse_opt(t.transaction_type.as_deref())?,
            amount: t.amount,
            category: t.category,
            date: t.date,
            notes: t.notes,
        })
    }
}

/// List filters; date bounds are inclusive.
#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TransactionQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TryFrom<TransactionQuery> for core_transactions::TransactionFilter {
    type Error = CoreError;

    fn try_from(q: TransactionQuery) -> CoreResult<Self> {
        Ok(Self {
            transaction_type: parse_opt(q.transaction_type.as_deref())?,
            category: q
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            start_date: q.start_date,
            end_date: q.end_date,
        })
    }
}

#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[into_params(parameter_in = Query)]
pub struct TypeQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

impl TypeQuery {
    /// The requested transaction type, expenses when absent.
    pub fn resolve(&self) -> CoreResult<TransactionType> {
        Ok(parse_opt(self.transaction_type.as_deref())?.unwrap_or_default())
    }
}

// ===================== Categories =====================

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
pub struct CategoryRequest {
    pub name: Option<String>,
}

impl CategoryRequest {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

// ===================== Budgets =====================

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub period: Option<String>,
    pub start_date: Option<NaiveDate>,
}

impl TryFrom<NewBudget> for core_budgets::NewBudget {
    type Error = CoreError;

    fn try_from(b: NewBudget) -> CoreResult<Self> {
        let period = parse_opt::<BudgetPeriod>(b.period.as_deref())?.unwrap_or_default();
        let (Some(category), Some(amount)) = (b.category, b.amount) else {
            return Err(CoreError::invalid_input("Category and amount are required"));
        };
        Ok(Self {
            category,
            amount,
            period,
            start_date: b.start_date,
        })
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub amount: Option<Decimal>,
    pub period: Option<String>,
}

impl TryFrom<BudgetUpdate> for core_budgets::BudgetUpdate {
    type Error = CoreError;

    fn try_from(b: BudgetUpdate) -> CoreResult<Self> {
        Ok(Self {
            amount: b.amount,
            period: parse_opt(b.period.as_deref())?,
        })
    }
}

// ===================== Goals =====================

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: Option<String>,
    pub target_amount: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    pub current_amount: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl From<NewGoal> for core_goals::NewGoal {
    fn from(g: NewGoal) -> Self {
        Self {
            title: g.title,
            target_amount: g.target_amount,
            target_date: g.target_date,
            current_amount: g.current_amount,
            start_date: g.start_date,
            category: g.category,
            description: g.description,
            icon: g.icon,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub target_amount: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl From<GoalUpdate> for core_goals::GoalUpdate {
    fn from(g: GoalUpdate) -> Self {
        Self {
            title: g.title,
            target_amount: g.target_amount,
            target_date: g.target_date,
            category: g.category,
            description: g.description,
            icon: g.icon,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
pub struct ContributionRequest {
    pub amount: Option<Decimal>,
    pub note: Option<String>,
}

impl TryFrom<ContributionRequest> for core_goals::NewGoalContribution {
    type Error = CoreError;

    fn try_from(c: ContributionRequest) -> CoreResult<Self> {
        let amount = c
            .amount
            .ok_or_else(|| CoreError::invalid_input(INVALID_CONTRIBUTION_MESSAGE))?;
        Ok(Self {
            amount,
            note: c.note,
        })
    }
}

// ===================== Reports / export =====================

/// Report month; each part defaults to the current UTC month.
#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

impl ReportQuery {
    pub fn period(&self, today: NaiveDate) -> CoreResult<MonthPeriod> {
        MonthPeriod::resolve(self.month, self.year, today)
    }

    pub fn transaction_type(&self) -> CoreResult<TransactionType> {
        Ok(parse_opt(self.transaction_type.as_deref())?.unwrap_or_default())
    }
}

#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<ExportQuery> for core_transactions::TransactionFilter {
    fn from(q: ExportQuery) -> Self {
        Self {
            start_date: q.start_date,
            end_date: q.end_date,
            ..Default::default()
        }
    }
}
