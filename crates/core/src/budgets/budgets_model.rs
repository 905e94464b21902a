//! Budgets domain models.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{BUDGET_EXCEEDED_PERCENT, BUDGET_WARNING_PERCENT};
use crate::errors::{Error, Result};
use crate::utils::{round_display, week_range, year_range, DateRange, MonthPeriod};

/// How often a budget resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }

    /// The window of this period that contains `date`.
    pub fn window_containing(&self, date: NaiveDate) -> Result<DateRange> {
        let window = match self {
            BudgetPeriod::Weekly => week_range(date),
            BudgetPeriod::Monthly => Some(MonthPeriod::containing(date)?.range()),
            BudgetPeriod::Yearly => year_range(date.year()),
        };
        window.ok_or_else(|| {
            Error::Unexpected(format!("No {} window contains {}", self.as_str(), date))
        })
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(Error::invalid_input(format!(
                "Budget period must be 'weekly', 'monthly' or 'yearly', got '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing a spending limit for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a budget. A missing start date means today.
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: Option<NaiveDate>,
}

impl NewBudget {
    pub fn validate(&mut self) -> Result<()> {
        validate_budget_amount(self.amount)?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::invalid_input("Category is required"));
        }
        self.category = category.to_string();
        Ok(())
    }
}

/// Only the amount and the period of a budget can change.
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub amount: Option<Decimal>,
    pub period: Option<BudgetPeriod>,
}

impl Budget {
    pub fn apply_update(&mut self, update: BudgetUpdate) -> Result<()> {
        if let Some(amount) = update.amount {
            validate_budget_amount(amount)?;
            self.amount = amount;
        }
        if let Some(period) = update.period {
            self.period = period;
        }
        Ok(())
    }
}

fn validate_budget_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::invalid_input(
            "Budget amount must be greater than zero",
        ));
    }
    Ok(())
}

/// Traffic-light classification of budget utilisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetHealth {
    Ok,
    Warning,
    Exceeded,
}

impl BudgetHealth {
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= Decimal::from(BUDGET_EXCEEDED_PERCENT) {
            BudgetHealth::Exceeded
        } else if percentage >= Decimal::from(BUDGET_WARNING_PERCENT) {
            BudgetHealth::Warning
        } else {
            BudgetHealth::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetHealth::Ok => "ok",
            BudgetHealth::Warning => "warning",
            BudgetHealth::Exceeded => "exceeded",
        }
    }
}

/// `spent` as a percentage of `budgeted`; zero when nothing is budgeted.
/// Not rounded, so the health thresholds see the exact value.
pub fn utilization_percentage(spent: Decimal, budgeted: Decimal) -> Decimal {
    if budgeted.is_zero() {
        Decimal::ZERO
    } else {
        spent / budgeted * Decimal::ONE_HUNDRED
    }
}

/// Spending against a budget within its current period window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub id: String,
    pub category: String,
    pub period: BudgetPeriod,
    pub budget_amount: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub status: BudgetHealth,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

impl BudgetStatus {
    pub fn new(budget: &Budget, spent: Decimal, window: DateRange) -> Self {
        let percentage = utilization_percentage(spent, budget.amount);
        BudgetStatus {
            id: budget.id.clone(),
            category: budget.category.clone(),
            period: budget.period,
            budget_amount: budget.amount,
            spent: round_display(spent),
            remaining: round_display(budget.amount - spent),
            percentage: round_display(percentage),
            status: BudgetHealth::from_percentage(percentage),
            period_start: window.start,
            period_end: window.end,
        }
    }
}
