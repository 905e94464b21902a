use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::budgets_model::{Budget, BudgetStatus, BudgetUpdate, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result};
use crate::transactions::{TransactionFilter, TransactionRepositoryTrait, TransactionType};
use crate::utils::{today_utc, DateRange};

pub struct BudgetService {
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
    transaction_repo: Arc<dyn TransactionRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
        transaction_repo: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        BudgetService {
            budget_repo,
            transaction_repo,
        }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        self.budget_repo.list(user_id)
    }

    async fn create_budget(&self, user_id: &str, mut new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        if self
            .budget_repo
            .find_by_category(user_id, &new_budget.category)?
            .is_some()
        {
            return Err(Error::ConstraintViolation(
                "Budget for this category already exists".to_string(),
            ));
        }
        new_budget.start_date.get_or_insert_with(today_utc);
        debug!(
            "Creating {} budget of {} for '{}'",
            new_budget.period, new_budget.amount, new_budget.category
        );
        self.budget_repo.create(user_id, new_budget).await
    }

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget> {
        let mut budget = self.budget_repo.get_by_id(user_id, budget_id)?;
        budget.apply_update(update)?;
        self.budget_repo.update(budget).await
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()> {
        match self.budget_repo.delete(user_id, budget_id).await? {
            0 => Err(Error::NotFound("Budget".to_string())),
            _ => Ok(()),
        }
    }

    fn get_budget_status(&self, user_id: &str, today: NaiveDate) -> Result<Vec<BudgetStatus>> {
        let budgets = self.budget_repo.list(user_id)?;
        let windows = budgets
            .iter()
            .map(|b| b.period.window_containing(today))
            .collect::<Result<Vec<DateRange>>>()?;

        // One query covering every window; per-budget sums are taken below.
        let (Some(start), Some(end)) = (
            windows.iter().map(|w| w.start).min(),
            windows.iter().map(|w| w.end).max(),
        ) else {
            return Ok(Vec::new());
        };
        let expenses = self.transaction_repo.list(
            user_id,
            &TransactionFilter::for_type_in_range(
                TransactionType::Expense,
                DateRange::new(start, end),
            ),
        )?;

        Ok(budgets
            .iter()
            .zip(windows)
            .map(|(budget, window)| {
                let spent: Decimal = expenses
                    .iter()
                    .filter(|t| t.category == budget.category && window.contains(t.date))
                    .map(|t| t.amount)
                    .sum();
                BudgetStatus::new(budget, spent, window)
            })
            .collect())
    }
}
