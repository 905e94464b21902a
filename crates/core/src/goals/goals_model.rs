//! Goals domain models.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_GOAL_CATEGORY, DEFAULT_GOAL_ICON};
use crate::errors::{Error, Result};
use crate::utils::today_utc;

pub const GOAL_REQUIRED_FIELDS_MESSAGE: &str = "Title, target amount, and target date are required";
pub const INVALID_CONTRIBUTION_MESSAGE: &str = "Valid contribution amount is required";

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub category: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub description: String,
    pub icon: String,
    pub is_completed: bool,
    pub contribution_history: Vec<GoalContribution>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A single deposit towards a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalContribution {
    pub id: String,
    pub goal_id: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub note: String,
}

/// Input model for creating a new goal. Title, target amount and target
/// date are required; everything else has a default.
#[derive(Debug, Clone, Default)]
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

/// Partial goal update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub target_amount: Option<Decimal>,
    pub target_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGoalContribution {
    pub amount: Decimal,
    pub note: Option<String>,
}

fn non_empty_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_target_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::invalid_input(
            "Target amount must be greater than zero",
        ));
    }
    Ok(())
}

impl Goal {
    /// Builds a fresh goal owned by `user_id`, applying defaults.
    pub fn create(user_id: &str, new_goal: NewGoal) -> Result<Self> {
        let (Some(title), Some(target_amount), Some(target_date)) = (
            non_empty_trimmed(new_goal.title),
            new_goal.target_amount,
            new_goal.target_date,
        ) else {
            return Err(Error::invalid_input(GOAL_REQUIRED_FIELDS_MESSAGE));
        };
        validate_target_amount(target_amount)?;

        let current_amount = new_goal.current_amount.unwrap_or(Decimal::ZERO);
        if current_amount < Decimal::ZERO {
            return Err(Error::invalid_input("Current amount cannot be negative"));
        }

        let now = Utc::now().naive_utc();
        Ok(Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title,
            target_amount,
            current_amount,
            category: non_empty_trimmed(new_goal.category)
                .unwrap_or_else(|| DEFAULT_GOAL_CATEGORY.to_string()),
            start_date: new_goal.start_date.unwrap_or_else(today_utc),
            target_date,
            description: new_goal
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            icon: non_empty_trimmed(new_goal.icon)
                .unwrap_or_else(|| DEFAULT_GOAL_ICON.to_string()),
            is_completed: current_amount >= target_amount,
            contribution_history: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_update(&mut self, update: GoalUpdate) -> Result<()> {
        if let Some(title) = update.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(Error::invalid_input("Title cannot be empty"));
            }
            self.title = title.to_string();
        }
        if let Some(target_amount) = update.target_amount {
            validate_target_amount(target_amount)?;
            self.target_amount = target_amount;
        }
        if let Some(target_date) = update.target_date {
            self.target_date = target_date;
        }
        if let Some(category) = non_empty_trimmed(update.category) {
            self.category = category;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(icon) = non_empty_trimmed(update.icon) {
            self.icon = icon;
        }
        self.refresh_completion();
        self.updated_at = Utc::now().naive_utc();
        Ok(())
    }

    /// Records a contribution and marks the goal completed once the target
    /// is reached. A completed goal stays completed.
    pub fn apply_contribution(&mut self, contribution: GoalContribution) {
        self.current_amount += contribution.amount;
        if self.current_amount >= self.target_amount {
            self.is_completed = true;
        }
        self.updated_at = contribution.date;
        self.contribution_history.push(contribution);
    }

    fn refresh_completion(&mut self) {
        self.is_completed = self.current_amount >= self.target_amount;
    }
}

impl NewGoalContribution {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::invalid_input(INVALID_CONTRIBUTION_MESSAGE));
        }
        Ok(())
    }

    /// Stamps the contribution with a fresh id and the current time.
    pub fn into_contribution(self, goal_id: &str) -> GoalContribution {
        GoalContribution {
            id: Uuid::new_v4().to_string(),
            goal_id: goal_id.to_string(),
            amount: self.amount,
            date: Utc::now().naive_utc(),
            note: self.note.map(|n| n.trim().to_string()).unwrap_or_default(),
        }
    }
}
