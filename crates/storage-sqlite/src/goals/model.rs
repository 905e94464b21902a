//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use pennywise_core::goals::{Goal, GoalContribution};

use crate::utils::{format_decimal, parse_decimal};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: String,
    pub current_amount: String,
    pub category: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub description: String,
    pub icon: String,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goal_contributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalContributionDB {
    pub id: String,
    pub goal_id: String,
    pub amount: String,
    pub date: NaiveDateTime,
    pub note: String,
}

impl GoalDB {
    /// Combines a goal row with its contributions, oldest first.
    pub fn into_goal(self, contributions: Vec<GoalContributionDB>) -> Goal {
        Goal {
            target_amount: parse_decimal(&self.target_amount, "goals.target_amount"),
            current_amount: parse_decimal(&self.current_amount, "goals.current_amount"),
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            category: self.category,
            start_date: self.start_date,
            target_date: self.target_date,
            description: self.description,
            icon: self.icon,
            is_completed: self.is_completed,
            contribution_history: contributions
                .into_iter()
                .map(GoalContribution::from)
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&Goal> for GoalDB {
    fn from(goal: &Goal) -> Self {
        GoalDB {
            id: goal.id.clone(),
            user_id: goal.user_id.clone(),
            title: goal.title.clone(),
            target_amount: format_decimal(goal.target_amount),
            current_amount: format_decimal(goal.current_amount),
            category: goal.category.clone(),
            start_date: goal.start_date,
            target_date: goal.target_date,
            description: goal.description.clone(),
            icon: goal.icon.clone(),
            is_completed: goal.is_completed,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}

impl From<GoalContributionDB> for GoalContribution {
    fn from(db: GoalContributionDB) -> Self {
        GoalContribution {
            amount: parse_decimal(&db.amount, "goal_contributions.amount"),
            id: db.id,
            goal_id: db.goal_id,
            date: db.date,
            note: db.note,
        }
    }
}

impl From<&GoalContribution> for GoalContributionDB {
    fn from(contribution: &GoalContribution) -> Self {
        GoalContributionDB {
            id: contribution.id.clone(),
            goal_id: contribution.goal_id.clone(),
            amount: format_decimal(contribution.amount),
            date: contribution.date,
            note: contribution.note.clone(),
        }
    }
}
